//! Line classification for the grouping pass.
//!
//! Each trimmed input line is exactly one of: ignorable filler, the start
//! of a new task, or a continuation belonging to the task above it.

use crate::parse::patterns::Patterns;

/// Classification outcome for one trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Structural noise: headers, labels without a task, tiny fragments.
    /// Kept inside an open task group, dropped otherwise.
    Ignorable,
    /// Opens a new task group; carries the captured label text.
    TaskStart(String),
    /// Plain content line; belongs to the open task group if any.
    Continuation,
}

/// Classifies one line. Expects the line to be trimmed already.
///
/// The ignorable test runs first so that label lines such as
/// "Description : …" never register as tasks even when they happen to fit
/// a task-start shape.
pub fn classify(patterns: &Patterns, line: &str) -> LineClass {
    if is_ignorable(patterns, line) {
        return LineClass::Ignorable;
    }
    if let Some(label) = patterns.capture_label(line) {
        return LineClass::TaskStart(label);
    }
    LineClass::Continuation
}

fn is_ignorable(patterns: &Patterns, line: &str) -> bool {
    if line.chars().count() < 3 {
        return true;
    }
    if patterns.ignore.iter().any(|pattern| pattern.is_match(line)) {
        return true;
    }
    patterns.emoji_label.is_match(line) || patterns.section_header.is_match(line)
}
