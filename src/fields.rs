//! Enumerations and vocabulary types for the converter.
//!
//! This module defines the small structured types shared across the parsing
//! pipeline: task roles, priority levels with their normalisation tables,
//! description sections, and the CLI-facing policy and format choices.

use clap::ValueEnum;

/// Structural role of a task group within the import hierarchy.
///
/// A parent names a tasklist; a child is a task inside the most recent
/// tasklist above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Parent,
    Child,
}

/// Normalised priority levels accepted by the Teamwork import sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Returns the exact cell value written to the PRIORITY column.
    pub fn as_cell(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Finds a priority keyword anywhere inside free text.
    ///
    /// Keywords are tried in a fixed order and the first hit wins, so text
    /// such as "moyenne-haute" resolves deterministically.
    pub fn from_keyword(text: &str) -> Option<Priority> {
        let lower = text.to_lowercase();
        for (keyword, priority) in KEYWORD_TABLE {
            if lower.contains(keyword) {
                return Some(*priority);
            }
        }
        None
    }

    /// Matches a whole priority cell against the known spellings.
    ///
    /// Used when validating externally produced records, where the cell is
    /// expected to hold exactly one word in French or English.
    pub fn from_cell(value: &str) -> Option<Priority> {
        let lower = value.trim().to_lowercase();
        for (spelling, priority) in CELL_TABLE {
            if lower == *spelling {
                return Some(*priority);
            }
        }
        None
    }
}

/// Substring keywords recognised inside "Priorité :" text, in match order.
const KEYWORD_TABLE: &[(&str, Priority)] = &[
    ("élevée", Priority::High),
    ("haute", Priority::High),
    ("high", Priority::High),
    ("moyenne", Priority::Medium),
    ("medium", Priority::Medium),
    ("faible", Priority::Low),
    ("basse", Priority::Low),
    ("low", Priority::Low),
];

/// Exact cell spellings accepted during record validation.
const CELL_TABLE: &[(&str, Priority)] = &[
    ("élevée", Priority::High),
    ("elevee", Priority::High),
    ("haute", Priority::High),
    ("high", Priority::High),
    ("urgent", Priority::High),
    ("urgente", Priority::High),
    ("moyenne", Priority::Medium),
    ("moyen", Priority::Medium),
    ("medium", Priority::Medium),
    ("normale", Priority::Medium),
    ("normal", Priority::Medium),
    ("faible", Priority::Low),
    ("basse", Priority::Low),
    ("low", Priority::Low),
    ("bas", Priority::Low),
];

/// Labelled sections a detail line can be filed under.
///
/// The extractor keeps a cursor of the section it is currently inside so
/// that unlabelled continuation lines land in the right bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Description,
    Dependency,
    Criteria,
    Deliverable,
    Risk,
    Milestone,
}

/// Strategies for deciding whether a numbered line opens a tasklist.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum HierarchyPolicy {
    /// Project-code prefixes (`AB-CD-001 -`) mark tasklists; everything
    /// else, including bare numbering, is a task.
    CodePrefix,
    /// Two numbering segments (`1.2`) mark tasklists; one or three or more
    /// segments mark tasks.
    Depth,
}

/// Supported output formats for the conversion result.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension used when deriving a default output name.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
