//! Description assembly from extracted field buckets.
//!
//! All captured sections are folded into the single DESCRIPTION cell, with
//! fixed French labels. Tasklists lead with delivery context (milestones,
//! deliverables, risks); tasks lead with execution context (dependencies,
//! acceptance criteria). One ordered walk covers both.

use crate::fields::{Role, Section};
use crate::parse::extract::FieldBucket;

const PARENT_ORDER: &[Section] = &[
    Section::Milestone,
    Section::Deliverable,
    Section::Risk,
    Section::Dependency,
    Section::Criteria,
];

const CHILD_ORDER: &[Section] = &[
    Section::Dependency,
    Section::Criteria,
    Section::Milestone,
    Section::Deliverable,
    Section::Risk,
];

/// Builds the DESCRIPTION cell for one task group.
///
/// Description fragments join into one leading part; each non-empty
/// section follows as a labelled part in role order. Parts join with
/// ". " and the whole cell carries one trailing period, or stays empty
/// when nothing was captured.
pub fn compose(bucket: &FieldBucket, role: Role) -> String {
    let order = match role {
        Role::Parent => PARENT_ORDER,
        Role::Child => CHILD_ORDER,
    };
    let mut parts = Vec::new();
    if !bucket.description.is_empty() {
        parts.push(bucket.description.join(" "));
    }
    for section in order {
        let values = bucket.section(*section);
        if values.is_empty() {
            continue;
        }
        let (label, joiner) = section_label(*section);
        parts.push(format!("{label}{}", values.join(joiner)));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{}.", parts.join(". "))
    }
}

fn section_label(section: Section) -> (&'static str, &'static str) {
    match section {
        Section::Description => ("", " "),
        Section::Milestone => ("Jalon Principal : ", " "),
        Section::Deliverable => ("Livrables : ", ", "),
        Section::Risk => ("Risques : ", ", "),
        Section::Dependency => ("Dépendance : ", ", "),
        Section::Criteria => ("Critère d'acceptation : ", " "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_order_puts_dependencies_first() {
        let bucket = FieldBucket {
            description: vec!["Planifier les publications".to_string()],
            dependencies: vec!["1".to_string()],
            criteria: vec!["Calendrier complet".to_string()],
            ..FieldBucket::default()
        };
        assert_eq!(
            compose(&bucket, Role::Child),
            "Planifier les publications. Dépendance : 1. Critère d'acceptation : Calendrier complet."
        );
    }

    #[test]
    fn test_parent_order_puts_delivery_context_first() {
        let bucket = FieldBucket {
            milestones: vec!["Lancement".to_string()],
            deliverables: vec!["maquette".to_string(), "prototype".to_string()],
            risks: vec!["retard".to_string()],
            dependencies: vec!["fournisseur".to_string()],
            ..FieldBucket::default()
        };
        assert_eq!(
            compose(&bucket, Role::Parent),
            "Jalon Principal : Lancement. Livrables : maquette, prototype. Risques : retard. Dépendance : fournisseur."
        );
    }

    #[test]
    fn test_description_fragments_join_as_one_part() {
        let bucket = FieldBucket {
            description: vec!["Première".to_string(), "seconde".to_string()],
            ..FieldBucket::default()
        };
        assert_eq!(compose(&bucket, Role::Child), "Première seconde.");
    }

    #[test]
    fn test_empty_bucket_composes_nothing() {
        assert_eq!(compose(&FieldBucket::default(), Role::Parent), "");
        assert_eq!(compose(&FieldBucket::default(), Role::Child), "");
    }
}
