//! Field extraction from grouped detail lines.
//!
//! The extractor walks the detail lines of one task group with a section
//! cursor. Label lines file their remainder and move the cursor; unlabeled
//! lines fall into whatever section the cursor points at. The estimated
//! time is resolved once per group from the joined text, so the label and
//! its value may sit on different lines.

use crate::fields::{Priority, Section};
use crate::parse::group::TaskGroup;
use crate::parse::patterns::{LabelAction, Patterns};

/// Field values gathered from one task group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBucket {
    pub description: Vec<String>,
    pub dependencies: Vec<String>,
    pub criteria: Vec<String>,
    pub deliverables: Vec<String>,
    pub risks: Vec<String>,
    pub milestones: Vec<String>,
    pub priority: Option<String>,
    pub estimated_time: Option<String>,
}

impl FieldBucket {
    pub fn section(&self, section: Section) -> &[String] {
        match section {
            Section::Description => &self.description,
            Section::Dependency => &self.dependencies,
            Section::Criteria => &self.criteria,
            Section::Deliverable => &self.deliverables,
            Section::Risk => &self.risks,
            Section::Milestone => &self.milestones,
        }
    }

    fn section_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Description => &mut self.description,
            Section::Dependency => &mut self.dependencies,
            Section::Criteria => &mut self.criteria,
            Section::Deliverable => &mut self.deliverables,
            Section::Risk => &mut self.risks,
            Section::Milestone => &mut self.milestones,
        }
    }
}

/// Extracts labelled details from one task group.
///
/// Label rules run in their fixed priority order and the first match
/// handles the line. Priority lines overwrite earlier ones, so the last
/// priority in a group wins. Estimated-time lines carry no other detail
/// and are dropped from the section flow.
pub fn extract(patterns: &Patterns, group: &TaskGroup) -> FieldBucket {
    let mut bucket = FieldBucket::default();
    let mut cursor = Section::Description;
    for line in group.detail_lines() {
        if let Some(rule) = patterns.labels.iter().find(|rule| rule.matches.is_match(line)) {
            let remainder = rule.strip.replace(line, "");
            let remainder = remainder.trim();
            match rule.action {
                LabelAction::File(section) => {
                    cursor = section;
                    if !remainder.is_empty() {
                        bucket.section_mut(section).push(remainder.to_string());
                    }
                }
                LabelAction::Priority => {
                    bucket.priority = priority_value(remainder);
                }
            }
            continue;
        }
        if patterns.time_label.is_match(line) {
            continue;
        }
        bucket.section_mut(cursor).push(line.to_string());
    }
    bucket.estimated_time = estimated_time(patterns, &group.joined());
    bucket
}

/// Maps priority text to a canonical cell, keeping unknown text verbatim.
fn priority_value(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    match Priority::from_keyword(text) {
        Some(priority) => Some(priority.as_cell().to_string()),
        None => Some(text.to_string()),
    }
}

/// Resolves "Durée estimée :"/"Temps estimé :" durations to the
/// `<n>hr`/`<n>mn` cell format. Hours are tried first; one value per
/// group.
fn estimated_time(patterns: &Patterns, text: &str) -> Option<String> {
    if let Some(captures) = patterns.hours.captures(text) {
        return Some(format!("{}hr", &captures[1]));
    }
    if let Some(captures) = patterns.minutes.captures(text) {
        return Some(format!("{}mn", &captures[1]));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_of(lines: &[&str]) -> TaskGroup {
        TaskGroup {
            lines: lines.iter().map(|line| line.to_string()).collect(),
        }
    }

    #[test]
    fn test_labelled_lines_land_in_their_sections() {
        let patterns = Patterns::new();
        let group = group_of(&[
            "2. Créer le calendrier éditorial",
            "Description : Planifier les publications sur 4 semaines",
            "Dépendance : 1",
            "Priorité : Élevée",
            "Critère d'acceptation : Calendrier complet",
        ]);
        let bucket = extract(&patterns, &group);
        assert_eq!(bucket.description, ["Planifier les publications sur 4 semaines"]);
        assert_eq!(bucket.dependencies, ["1"]);
        assert_eq!(bucket.criteria, ["Calendrier complet"]);
        assert_eq!(bucket.priority.as_deref(), Some("High"));
        assert_eq!(bucket.estimated_time, None);
    }

    #[test]
    fn test_unlabeled_lines_follow_the_cursor() {
        let patterns = Patterns::new();
        let group = group_of(&[
            "1. Tâche",
            "Première phrase libre",
            "Livrables : maquette",
            "et prototype final",
        ]);
        let bucket = extract(&patterns, &group);
        assert_eq!(bucket.description, ["Première phrase libre"]);
        assert_eq!(bucket.deliverables, ["maquette", "et prototype final"]);
    }

    #[test]
    fn test_last_priority_wins_and_unknown_text_is_kept() {
        let patterns = Patterns::new();
        let group = group_of(&["1. Tâche", "Priorité : faible", "Priorité : ASAP"]);
        let bucket = extract(&patterns, &group);
        assert_eq!(bucket.priority.as_deref(), Some("ASAP"));
    }

    #[test]
    fn test_estimated_time_is_read_from_the_joined_group() {
        let patterns = Patterns::new();
        let group = group_of(&["1. Tâche", "Durée estimée : 3h", "Description : X"]);
        let bucket = extract(&patterns, &group);
        assert_eq!(bucket.estimated_time.as_deref(), Some("3hr"));
        // The time line itself never reaches a section bucket.
        assert_eq!(bucket.description, ["X"]);

        let group = group_of(&["1. Tâche", "Temps estimé : 45 minutes"]);
        let bucket = extract(&patterns, &group);
        assert_eq!(bucket.estimated_time.as_deref(), Some("45mn"));
    }

    #[test]
    fn test_hours_win_over_minutes() {
        let patterns = Patterns::new();
        let group = group_of(&["1. Tâche", "Durée estimée : 2 heures", "Temps estimé : 30mn"]);
        let bucket = extract(&patterns, &group);
        assert_eq!(bucket.estimated_time.as_deref(), Some("2hr"));
    }
}
