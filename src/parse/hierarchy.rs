//! Numbering depth and parent/child role resolution.
//!
//! Task hierarchy is read from the decimal numbering token at the front of
//! a task-start line. Malformed or missing numbering never fails; such
//! lines sit at depth 1 with an empty token.

use crate::fields::{HierarchyPolicy, Role};
use crate::parse::patterns::Patterns;

/// Returns the numbering depth and raw token of a task-start line.
///
/// Depth counts dot-separated segments: "3" is depth 1, "3.2" depth 2,
/// "3.2.1" depth 3. Lines without numbering report `(1, "")`.
pub fn hierarchy_level(patterns: &Patterns, line: &str) -> (usize, String) {
    match patterns.hierarchy.captures(line) {
        Some(captures) => {
            let token = captures[1].to_string();
            let depth = token.split('.').count();
            (depth, token)
        }
        None => (1, String::new()),
    }
}

/// Decides whether a task-start line opens a tasklist or names a task.
pub fn role_for(patterns: &Patterns, line: &str, policy: HierarchyPolicy) -> Role {
    let (depth, token) = hierarchy_level(patterns, line);
    match policy {
        HierarchyPolicy::CodePrefix => {
            if token.contains('.') {
                Role::Child
            } else if patterns.code_parent.is_match(line) {
                Role::Parent
            } else {
                Role::Child
            }
        }
        HierarchyPolicy::Depth => {
            if depth == 2 {
                Role::Parent
            } else {
                Role::Child
            }
        }
    }
}

/// Strips numbering, markers and project-code prefixes from a task-start
/// line, leaving the task name.
///
/// A line matching no start shape still loses any leading code prefix.
pub fn clean_task_name(patterns: &Patterns, line: &str) -> String {
    let label = match patterns.capture_label(line) {
        Some(label) => label,
        None => line.trim().to_string(),
    };
    patterns.code_prefix.replace(&label, "").trim().to_string()
}
