//! Task grouping and project title detection.
//!
//! The grouper walks the document once and gathers each task-start line
//! with the detail lines below it. Nothing before the first task start
//! survives, and blank lines never carry information.

use crate::parse::classify::{classify, LineClass};
use crate::parse::patterns::Patterns;

/// A task-start line plus the detail lines gathered under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup {
    /// Trimmed lines; the first is always the task-start line.
    pub lines: Vec<String>,
}

impl TaskGroup {
    pub fn start_line(&self) -> &str {
        &self.lines[0]
    }

    pub fn detail_lines(&self) -> &[String] {
        &self.lines[1..]
    }

    /// The group joined back into one string, for whole-group scans.
    pub fn joined(&self) -> String {
        self.lines.join(" ")
    }
}

/// Splits a document into ordered task groups in a single forward pass.
///
/// A task-start line flushes the open group and opens the next one.
/// Ignorable and continuation lines are kept only inside an open group;
/// anything before the first task start is dropped.
pub fn split_groups(patterns: &Patterns, text: &str) -> Vec<TaskGroup> {
    let mut groups = Vec::new();
    let mut current: Option<Vec<String>> = None;
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match classify(patterns, line) {
            LineClass::TaskStart(_) => {
                if let Some(lines) = current.take() {
                    groups.push(TaskGroup { lines });
                }
                current = Some(vec![line.to_string()]);
            }
            LineClass::Ignorable | LineClass::Continuation => {
                if let Some(lines) = current.as_mut() {
                    lines.push(line.to_string());
                }
            }
        }
    }
    if let Some(lines) = current {
        groups.push(TaskGroup { lines });
    }
    groups
}

/// Picks the project title from the first five non-blank lines.
///
/// Candidates are cleaned of marker runs and emoji taglines; lines naming
/// the task list itself are skipped. The first candidate longer than five
/// characters wins, with "Projet" as the fallback.
pub fn project_title(patterns: &Patterns, text: &str) -> String {
    for raw in text.lines().map(str::trim).filter(|line| !line.is_empty()).take(5) {
        let cleaned = patterns.title_leading.replace(raw, "");
        let cleaned = patterns.title_trailing.replace(&cleaned, "");
        let cleaned = patterns.title_tagline.replace_all(&cleaned, "");
        let cleaned = cleaned.trim();
        let lower = cleaned.to_lowercase();
        if lower.contains("liste") && lower.contains("tâche") {
            continue;
        }
        if cleaned.chars().count() > 5 {
            return cleaned.to_string();
        }
    }
    "Projet".to_string()
}

/// Title and groups of one document, resolved together.
pub fn split_document(patterns: &Patterns, text: &str) -> (String, Vec<TaskGroup>) {
    (project_title(patterns, text), split_groups(patterns, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_follow_task_starts() {
        let patterns = Patterns::new();
        let text = "Campagne Marketing\n\n1. Publicité Digitale\n   Description: Gestion des campagnes\n2. Définir budget\n   Priorité: Élevée\n";
        let groups = split_groups(&patterns, text);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].start_line(), "1. Publicité Digitale");
        assert_eq!(groups[0].detail_lines(), ["Description: Gestion des campagnes"]);
        assert_eq!(groups[1].lines, ["2. Définir budget", "Priorité: Élevée"]);
    }

    #[test]
    fn test_content_before_first_task_is_dropped() {
        let patterns = Patterns::new();
        let text = "Un préambule sans tâche\nDescription : perdue\n1. Première tâche\n";
        let groups = split_groups(&patterns, text);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].lines, ["1. Première tâche"]);
    }

    #[test]
    fn test_header_only_document_has_no_groups() {
        let patterns = Patterns::new();
        let text = "✅ Liste des Tâches :\n\nObjectif général : rien\n";
        assert!(split_groups(&patterns, text).is_empty());
    }

    #[test]
    fn test_title_from_first_usable_line() {
        let patterns = Patterns::new();
        assert_eq!(project_title(&patterns, "Campagne Marketing\n1. Tâche\n"), "Campagne Marketing");
        assert_eq!(
            project_title(&patterns, "### Refonte du site ===\n1. Tâche\n"),
            "Refonte du site"
        );
        assert_eq!(project_title(&patterns, "court\n\n\n"), "Projet");
    }

    #[test]
    fn test_title_skips_list_headers_and_taglines() {
        let patterns = Patterns::new();
        let text = "Campagne – Liste de Tâches\n\n📌 Objectif général :\nPlanifier la campagne de visibilité\n";
        assert_eq!(project_title(&patterns, text), "Planifier la campagne de visibilité");
    }
}
