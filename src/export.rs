//! Tabular output sinks for converted records.
//!
//! Records leave the pipeline as CSV (the import sheet itself) or as a
//! pretty JSON array keyed by column header. File naming follows the
//! project title when the caller does not pick a path.

use std::io;
use std::path::Path;

use crate::fields::ExportFormat;
use crate::record::{TaskRecord, COLUMNS};

/// Renders records as CSV, header row first.
pub fn csv_content(records: &[TaskRecord]) -> String {
    // Quote fields holding commas, quotes or newlines; double inner quotes.
    let escape_csv = |s: &str| {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    };

    let mut content = String::new();
    content.push_str(&COLUMNS.join(","));
    content.push('\n');
    for record in records {
        let row: Vec<String> = record
            .column_values()
            .iter()
            .map(|value| escape_csv(value))
            .collect();
        content.push_str(&row.join(","));
        content.push('\n');
    }
    content
}

/// Renders records as a pretty JSON array keyed by column header.
pub fn json_content(records: &[TaskRecord]) -> String {
    serde_json::to_string_pretty(records).unwrap()
}

/// Writes records to `path` in the requested format.
pub fn write_records(records: &[TaskRecord], path: &Path, format: ExportFormat) -> io::Result<()> {
    let content = match format {
        ExportFormat::Csv => csv_content(records),
        ExportFormat::Json => json_content(records),
    };
    std::fs::write(path, content)
}

/// Default output file name for a project title, e.g.
/// "campagne_marketing_teamwork.csv".
pub fn default_output_name(project_title: &str, format: ExportFormat) -> String {
    format!("{}_teamwork.{}", sanitize_title(project_title), format.extension())
}

/// Lowercases a title and collapses every non-alphanumeric run into a
/// single underscore, for use in file names.
fn sanitize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TaskRecord;

    #[test]
    fn test_csv_starts_with_the_column_header() {
        let content = csv_content(&[]);
        assert_eq!(
            content,
            "TASKLIST,TASK,DESCRIPTION,ASSIGN TO,START DATE,DUE DATE,PRIORITY,ESTIMATED TIME,TAGS,STATUS\n"
        );
    }

    #[test]
    fn test_csv_escapes_commas_quotes_and_newlines() {
        let record = TaskRecord::child(
            "Choisir la palette, puis valider".to_string(),
            "Contient des \"guillemets\"\net un saut de ligne".to_string(),
            "High".to_string(),
            String::new(),
        );
        let content = csv_content(&[record]);
        let body = content.lines().skip(1).collect::<Vec<_>>().join("\n");
        assert_eq!(
            body,
            ",\"Choisir la palette, puis valider\",\"Contient des \"\"guillemets\"\"\net un saut de ligne\",,,,High,,,",
        );
    }

    #[test]
    fn test_json_round_trips_records() {
        let records = vec![TaskRecord::parent(
            "Logo Standard".to_string(),
            "Livrables : fichiers source.".to_string(),
            String::new(),
            String::new(),
        )];
        let parsed: Vec<TaskRecord> = serde_json::from_str(&json_content(&records)).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_write_records_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![TaskRecord::child(
            "Unique tâche".to_string(),
            String::new(),
            String::new(),
            "3hr".to_string(),
        )];
        write_records(&records, &path, ExportFormat::Csv).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("TASKLIST,TASK,"));
        assert!(content.contains("Unique tâche"));
        assert!(content.contains("3hr"));
    }

    #[test]
    fn test_default_output_name_follows_the_title() {
        assert_eq!(
            default_output_name("Campagne Marketing", ExportFormat::Csv),
            "campagne_marketing_teamwork.csv"
        );
        assert_eq!(
            default_output_name("Réseaux -- Sociaux!", ExportFormat::Json),
            "réseaux_sociaux_teamwork.json"
        );
        assert_eq!(default_output_name("", ExportFormat::Csv), "_teamwork.csv");
    }
}
