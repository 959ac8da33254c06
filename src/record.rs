//! Import-sheet record structure and related functionality.
//!
//! This module defines the `TaskRecord` struct that represents a single row
//! of a Teamwork Projects import sheet, together with the fixed column
//! order and the final priority normalisation pass.

use serde::{Deserialize, Serialize};

use crate::fields::Priority;

/// Column headers in the exact order the import sheet expects them.
pub const COLUMNS: [&str; 10] = [
    "TASKLIST",
    "TASK",
    "DESCRIPTION",
    "ASSIGN TO",
    "START DATE",
    "DUE DATE",
    "PRIORITY",
    "ESTIMATED TIME",
    "TAGS",
    "STATUS",
];

/// One row of the import sheet.
///
/// A row either names a tasklist or a task within the most recent tasklist.
/// The single exception is a document whose first task arrives before any
/// tasklist: that row carries both, which the importer reads as "new
/// tasklist containing this task". ASSIGN TO, the date columns, TAGS and
/// STATUS are reserved for manual completion and stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "TASKLIST", default)]
    pub tasklist: String,
    #[serde(rename = "TASK", default)]
    pub task: String,
    #[serde(rename = "DESCRIPTION", default)]
    pub description: String,
    #[serde(rename = "ASSIGN TO", default)]
    pub assign_to: String,
    #[serde(rename = "START DATE", default)]
    pub start_date: String,
    #[serde(rename = "DUE DATE", default)]
    pub due_date: String,
    #[serde(rename = "PRIORITY", default)]
    pub priority: String,
    #[serde(rename = "ESTIMATED TIME", default)]
    pub estimated_time: String,
    #[serde(rename = "TAGS", default)]
    pub tags: String,
    #[serde(rename = "STATUS", default)]
    pub status: String,
}

impl TaskRecord {
    /// Creates a row that opens a new tasklist.
    pub fn parent(name: String, description: String, priority: String, estimated_time: String) -> Self {
        TaskRecord {
            tasklist: name,
            description,
            priority,
            estimated_time,
            ..TaskRecord::default()
        }
    }

    /// Creates a row for a task inside the current tasklist.
    pub fn child(name: String, description: String, priority: String, estimated_time: String) -> Self {
        TaskRecord {
            task: name,
            description,
            priority,
            estimated_time,
            ..TaskRecord::default()
        }
    }

    /// A row with neither a tasklist nor a task name imports as nothing.
    pub fn is_importable(&self) -> bool {
        !self.tasklist.is_empty() || !self.task.is_empty()
    }

    /// Cell values in `COLUMNS` order, for table and CSV output.
    pub fn column_values(&self) -> [&str; 10] {
        [
            &self.tasklist,
            &self.task,
            &self.description,
            &self.assign_to,
            &self.start_date,
            &self.due_date,
            &self.priority,
            &self.estimated_time,
            &self.tags,
            &self.status,
        ]
    }
}

/// Rewrites localized priority spellings left in the PRIORITY column to the
/// canonical High/Medium/Low cells. Unknown text is kept as written.
pub fn normalise_priorities(records: &mut [TaskRecord]) {
    for record in records {
        if record.priority.is_empty() {
            continue;
        }
        if let Some(priority) = Priority::from_cell(&record.priority) {
            record.priority = priority.as_cell().to_string();
        }
    }
}
