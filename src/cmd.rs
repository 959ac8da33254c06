//! Command implementations for the CLI interface.
//!
//! This module contains the subcommand definitions and their handlers:
//! converting a document to an import sheet, previewing the conversion as
//! a table, printing the bundled sample document and generating shell
//! completions.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::io::Read;
use std::path::Path;

use crate::export::{default_output_name, write_records};
use crate::fields::ExportFormat;
use crate::pipeline::Converter;
use crate::record::TaskRecord;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a task document into an import sheet.
    Convert {
        /// Input text file, or "-" to read stdin.
        input: String,
        /// Output file path (default: "<project>_teamwork.<ext>").
        #[arg(long, short)]
        output: Option<String>,
        /// Output format: csv | json.
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },

    /// Preview the conversion as a table without writing a file.
    Preview {
        /// Input text file, or "-" to read stdin.
        input: String,
    },

    /// Print the bundled sample document.
    Sample,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sample document in the structure the parser expects, for trying the
/// converter out: `t2t sample | t2t preview -`.
pub const SAMPLE_TEXT: &str = "Campagne Réseaux Sociaux – Liste de Tâches

📌 Objectif général :
Planifier et lancer une campagne de visibilité sur Instagram et LinkedIn.

Jalon Principal : Lancement du premier post sponsorisé

✅ Liste des Tâches :

1. Définir le concept de la campagne
Description : Trouver un message central et un thème visuel
Critère d'acceptation : Concept validé par l'équipe

2. Créer le calendrier éditorial
Description : Planifier les publications sur 4 semaines
Dépendance : 1
Priorité : Élevée
Critère d'acceptation : Calendrier complet avec visuels et dates

3. Rédiger les textes des publications
Description : Écrire les posts pour les 2 premières semaines
Dépendance : 2
Critère d'acceptation : Textes relus et validés
";

/// Convert a document and write the import sheet.
pub fn cmd_convert(converter: &Converter, input: String, output: Option<String>, format: ExportFormat) {
    let text = read_document(&input);
    let records = converter.convert(&text);
    if records.is_empty() {
        println!("No tasks detected.");
        return;
    }
    let output_path =
        output.unwrap_or_else(|| default_output_name(&converter.project_title(&text), format));
    if let Err(e) = write_records(&records, Path::new(&output_path), format) {
        eprintln!("Failed to write {}: {}", output_path, e);
        std::process::exit(1);
    }
    println!("Exported {} record(s) to {}", records.len(), output_path);
}

/// Preview the conversion as an aligned table plus summary counts.
pub fn cmd_preview(converter: &Converter, input: String) {
    let text = read_document(&input);
    let records = converter.convert(&text);
    if records.is_empty() {
        println!("No tasks detected.");
        return;
    }
    print_records(&records);
    let with_priority = records.iter().filter(|record| !record.priority.is_empty()).count();
    println!();
    println!("{} record(s), {} with a priority", records.len(), with_priority);
    println!("Project: {}", converter.project_title(&text));
}

/// Print the bundled sample document to stdout.
pub fn cmd_sample() {
    print!("{}", SAMPLE_TEXT);
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Read the input document from a file, or from stdin when given "-".
fn read_document(input: &str) -> String {
    if input == "-" {
        let mut text = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut text) {
            eprintln!("Failed to read stdin: {}", e);
            std::process::exit(1);
        }
        return text;
    }
    match std::fs::read_to_string(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input, e);
            std::process::exit(1);
        }
    }
}

fn print_records(records: &[TaskRecord]) {
    println!(
        "{:<20} {:<28} {:<8} {:<6} {}",
        "Tasklist", "Task", "Priority", "Est", "Description"
    );
    for record in records {
        println!(
            "{:<20} {:<28} {:<8} {:<6} {}",
            truncate(&record.tasklist, 20),
            truncate(&record.task, 28),
            record.priority,
            record.estimated_time,
            truncate(&record.description, 48)
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::HierarchyPolicy;

    #[test]
    fn test_sample_document_converts_to_three_records() {
        let converter = Converter::new(HierarchyPolicy::CodePrefix);
        let records = converter.convert(SAMPLE_TEXT);
        assert_eq!(records.len(), 3);

        // The title line names the list itself, so the objective below it
        // becomes the project title and the first task inherits it.
        assert_eq!(
            records[0].tasklist,
            "Planifier et lancer une campagne de visibilité sur Instagram et LinkedIn."
        );
        assert_eq!(records[0].task, "Définir le concept de la campagne");
        assert_eq!(
            records[0].description,
            "Trouver un message central et un thème visuel. Critère d'acceptation : Concept validé par l'équipe."
        );

        assert_eq!(records[1].task, "Créer le calendrier éditorial");
        assert_eq!(records[1].priority, "High");
        assert_eq!(
            records[1].description,
            "Planifier les publications sur 4 semaines. Dépendance : 1. Critère d'acceptation : Calendrier complet avec visuels et dates."
        );

        assert_eq!(records[2].task, "Rédiger les textes des publications");
        assert_eq!(records[2].tasklist, "");
        assert_eq!(
            records[2].description,
            "Écrire les posts pour les 2 premières semaines. Dépendance : 2. Critère d'acceptation : Textes relus et validés."
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("court", 10), "court");
        assert_eq!(truncate("exactement", 10), "exactement");
        assert_eq!(truncate("un libellé nettement trop long", 10), "un libell…");
    }
}
