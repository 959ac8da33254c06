//! Compiled pattern library for the rule-based parser.
//!
//! Every regular expression the pipeline relies on is compiled once here
//! and shared by reference. The collections keep their documented priority
//! order; the classifier and extractor walk them front to back and stop at
//! the first hit.

use regex::Regex;

use crate::fields::Section;

/// How the extractor handles a line once a label rule matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAction {
    /// File the remainder under this section and move the cursor there.
    File(Section),
    /// Parse the remainder as a priority value. Does not move the cursor.
    Priority,
}

/// A detail-line label: a detection pattern plus the strip pattern that
/// removes everything up to and including the label text.
pub struct LabelRule {
    pub matches: Regex,
    pub strip: Regex,
    pub action: LabelAction,
}

/// All compiled patterns used by classification, hierarchy resolution,
/// field extraction and title cleanup.
pub struct Patterns {
    /// Task-start shapes in detection priority order: project-code line,
    /// decimal numbering, bullet, checkmark, lettered item.
    pub task_starts: Vec<Regex>,
    /// Structural labels and headers; a match anywhere marks the line as
    /// non-task content.
    pub ignore: Vec<Regex>,
    /// Emoji-prefixed label lines ("🔗 Dépendance", "📋 Livrable").
    pub emoji_label: Regex,
    /// Glyph-prefixed section headers ("✅ Liste des Tâches").
    pub section_header: Regex,
    /// Captures the decimal numbering token, with or without a leading
    /// project code.
    pub hierarchy: Regex,
    /// A single-segment project code opening a line ("AB-CD-001 -").
    pub code_parent: Regex,
    /// Full project-code prefix, stripped from cleaned task names.
    pub code_prefix: Regex,
    /// Label rules in extraction priority order.
    pub labels: Vec<LabelRule>,
    /// Estimated-time label; lines matching it carry no other detail.
    pub time_label: Regex,
    /// Label-anchored duration in hours.
    pub hours: Regex,
    /// Label-anchored duration in minutes.
    pub minutes: Regex,
    /// Marker runs stripped from the front of title candidates.
    pub title_leading: Regex,
    /// Marker runs stripped from the end of title candidates.
    pub title_trailing: Regex,
    /// Emoji taglines ("📌 … :") removed from title candidates.
    pub title_tagline: Regex,
}

impl Patterns {
    pub fn new() -> Self {
        let label = |matches: &str, strip: &str, action: LabelAction| LabelRule {
            matches: Regex::new(matches).unwrap(),
            strip: Regex::new(strip).unwrap(),
            action,
        };
        Patterns {
            task_starts: vec![
                Regex::new(r"^[A-Z]{2,}-[A-Z]{2,}-\d+(?:\.\d+)*\s*[-–]\s*(.+)").unwrap(),
                Regex::new(r"^\d+(?:\.\d+)*\.?\s*[–-]?\s*(.+)").unwrap(),
                Regex::new(r"^[-•]\s*(.+)").unwrap(),
                Regex::new(r"^[✓✅]\s*(.+)").unwrap(),
                Regex::new(r"^[a-zA-Z]\)\s*(.+)").unwrap(),
            ],
            ignore: vec![
                Regex::new(r"(?i)critère\s*d['’]acceptation").unwrap(),
                Regex::new(r"(?i)dépendance\s*:").unwrap(),
                Regex::new(r"(?i)livrable\s*:").unwrap(),
                Regex::new(r"(?i)risque\s*:").unwrap(),
                Regex::new(r"(?i)description\s*:").unwrap(),
                Regex::new(r"(?i)liste\s+des\s+tâches").unwrap(),
                Regex::new(r"(?i)objectif\s+général").unwrap(),
                Regex::new(r"(?i)jalon\s+principal").unwrap(),
                Regex::new(r"(?i)gestion\s+des\s+risques").unwrap(),
            ],
            emoji_label: Regex::new(
                r"(?i)^\s*[🔗📋✅❗⚠️📌🎯]\s*(critère|dépendance|livrable|risque|liste|objectif|jalon)",
            )
            .unwrap(),
            section_header: Regex::new(r"(?i)^\s*[✅📌🎯]\s+.*?(liste|objectif|jalon)").unwrap(),
            hierarchy: Regex::new(r"^(?:[A-Z]{2,}-[A-Z]{2,}-)?(\d+(?:\.\d+)*)").unwrap(),
            code_parent: Regex::new(r"^[A-Z]{2,}-[A-Z]{2,}-\d+\s*[-–]").unwrap(),
            code_prefix: Regex::new(r"^[A-Z]{2,}-[A-Z]{2,}-\d+(?:\.\d+)*\s*[-–]\s*").unwrap(),
            labels: vec![
                label(
                    r"(?i)description\s*:",
                    r"(?i)^.*description\s*:\s*",
                    LabelAction::File(Section::Description),
                ),
                label(
                    r"(?i)priorité\s*:",
                    r"(?i)^.*priorité\s*:\s*",
                    LabelAction::Priority,
                ),
                label(
                    r"(?i)dépendance",
                    r"(?i)^.*dépendances?\s*:\s*",
                    LabelAction::File(Section::Dependency),
                ),
                label(
                    r"(?i)critère",
                    r"(?i)^.*critère.*?:\s*",
                    LabelAction::File(Section::Criteria),
                ),
                label(
                    r"(?i)livrable",
                    r"(?i)^.*livrables?\s*:\s*",
                    LabelAction::File(Section::Deliverable),
                ),
                label(
                    r"(?i)risque",
                    r"(?i)^.*risques?\s*:\s*",
                    LabelAction::File(Section::Risk),
                ),
                label(
                    r"(?i)jalon\s+principal",
                    r"(?i)^.*jalon\s+principal\s*:\s*",
                    LabelAction::File(Section::Milestone),
                ),
            ],
            time_label: Regex::new(r"(?i)durée\s+estimée|temps\s+estimé").unwrap(),
            hours: Regex::new(
                r"(?i)(?:durée\s+estimée|temps\s+estimé)\s*:\s*(\d+)\s*h(?:eures?|ours?|rs?)?\b",
            )
            .unwrap(),
            minutes: Regex::new(
                r"(?i)(?:durée\s+estimée|temps\s+estimé)\s*:\s*(\d+)\s*m(?:inutes?|ins?|n)\b",
            )
            .unwrap(),
            title_leading: Regex::new(r"^[#*\-=✅✓•]+\s*").unwrap(),
            title_trailing: Regex::new(r"\s*[#*\-=]+$").unwrap(),
            title_tagline: Regex::new(r"[📌🎯].*?:").unwrap(),
        }
    }

    /// Runs the task-start patterns in order and returns the first captured
    /// label text.
    pub fn capture_label(&self, line: &str) -> Option<String> {
        for pattern in &self.task_starts {
            if let Some(captures) = pattern.captures(line) {
                return Some(captures[1].trim().to_string());
            }
        }
        None
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Patterns::new()
    }
}
