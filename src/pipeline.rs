//! Conversion pipeline from raw text to import records.
//!
//! `Converter` owns the compiled patterns, the hierarchy policy and an
//! optional model extractor. The model path runs first when configured;
//! any failure degrades to the rule-based parser with a warning, never an
//! error. Both paths end in the same priority normalisation pass.

use crate::fields::{HierarchyPolicy, Role};
use crate::model::{ModelConfig, ModelExtractor};
use crate::parse::compose::compose;
use crate::parse::extract::{extract, FieldBucket};
use crate::parse::group::{self, split_document, TaskGroup};
use crate::parse::hierarchy::{clean_task_name, role_for};
use crate::parse::patterns::Patterns;
use crate::record::{normalise_priorities, TaskRecord};

/// Converts task documents into Teamwork import records.
pub struct Converter {
    patterns: Patterns,
    policy: HierarchyPolicy,
    model: Option<ModelExtractor>,
}

impl Converter {
    /// Rule-based converter with no model path.
    pub fn new(policy: HierarchyPolicy) -> Self {
        Converter {
            patterns: Patterns::new(),
            policy,
            model: None,
        }
    }

    /// Converter that tries the model extractor before the rules.
    ///
    /// An empty API key disables the model path up front, so conversion
    /// stays deterministic and offline.
    pub fn with_model(policy: HierarchyPolicy, config: ModelConfig) -> Self {
        let model = if config.api_key.trim().is_empty() {
            eprintln!("Warning: no API key configured, using the rule-based parser");
            None
        } else {
            match ModelExtractor::new(config) {
                Ok(extractor) => Some(extractor),
                Err(e) => {
                    eprintln!("Warning: {e}, using the rule-based parser");
                    None
                }
            }
        };
        Converter {
            patterns: Patterns::new(),
            policy,
            model,
        }
    }

    /// The project title the document converts under.
    pub fn project_title(&self, text: &str) -> String {
        group::project_title(&self.patterns, text)
    }

    /// Converts one document. An empty result is a valid outcome, not an
    /// error.
    pub fn convert(&self, text: &str) -> Vec<TaskRecord> {
        let (title, groups) = split_document(&self.patterns, text);
        if let Some(model) = &self.model {
            match model.extract(text, &title) {
                Ok(records) if !records.is_empty() => {
                    let mut records = records;
                    normalise_priorities(&mut records);
                    return records;
                }
                Ok(_) => {
                    eprintln!("Warning: model extraction returned no tasks, using the rule-based parser")
                }
                Err(e) => {
                    eprintln!("Warning: model extraction failed ({e}), using the rule-based parser")
                }
            }
        }
        let mut records = self.build_records(&title, &groups);
        normalise_priorities(&mut records);
        records
    }

    fn build_records(&self, title: &str, groups: &[TaskGroup]) -> Vec<TaskRecord> {
        let mut records = Vec::new();
        let mut open_parent: Option<String> = None;
        for group in groups {
            let start = group.start_line();
            let role = role_for(&self.patterns, start, self.policy);
            let name = clean_task_name(&self.patterns, start);
            match role {
                Role::Parent => open_parent = Some(name.clone()),
                Role::Child => open_parent = None,
            }
            let bucket = extract(&self.patterns, group);
            let description = compose(&bucket, role);
            let record = build_record(
                name,
                description,
                &bucket,
                role,
                title,
                records.is_empty(),
                open_parent.as_deref(),
            );
            if record.is_importable() {
                records.push(record);
            }
        }
        records
    }
}

/// Places one task group into the record schema.
///
/// Parents fill TASKLIST, children fill TASK. A child arriving first in the
/// document with no open parent also fills TASKLIST with the project title,
/// so the sheet opens with a named list.
fn build_record(
    name: String,
    description: String,
    bucket: &FieldBucket,
    role: Role,
    project_title: &str,
    first: bool,
    open_parent: Option<&str>,
) -> TaskRecord {
    let priority = bucket.priority.clone().unwrap_or_default();
    let estimated_time = bucket.estimated_time.clone().unwrap_or_default();
    match role {
        Role::Parent => TaskRecord::parent(name, description, priority, estimated_time),
        Role::Child => {
            let mut record = TaskRecord::child(name, description, priority, estimated_time);
            if first && open_parent.is_none() {
                record.tasklist = project_title.to_string();
            }
            record
        }
    }
}
