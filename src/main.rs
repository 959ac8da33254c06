//! # t2t - Text to Teamwork
//!
//! A command-line converter that turns semi-structured task documents into
//! import sheets for Teamwork Projects.
//!
//! ## Key Features
//!
//! - **Rule-Based Parsing**: Recognises numbered lists ("1.", "1.2"),
//!   project codes ("DC-DM-001 -"), bullets and checkmarks, in French or
//!   English documents
//! - **Hierarchy Detection**: Splits lines into tasklists and their tasks,
//!   either by project-code prefix or by numbering depth
//! - **Field Extraction**: Folds Description / Dépendance / Critère
//!   d'acceptation / Livrable / Risque / Jalon Principal lines into the
//!   DESCRIPTION column, with Priorité and Durée estimée mapped to their
//!   own columns
//! - **Model-Assisted Mode**: Optionally asks an OpenAI-style completion
//!   endpoint first and falls back to the rules on any failure
//! - **CSV/JSON Output**: Writes the fixed ten-column sheet Teamwork
//!   imports, or the same records as JSON
//!
//! ## Quick Start
//!
//! ```bash
//! # Look at the bundled sample document
//! t2t sample
//!
//! # Preview what it converts to
//! t2t sample | t2t preview -
//!
//! # Convert a file; the output name follows the project title
//! t2t convert tasks.txt
//!
//! # Convert with the model extractor (falls back to the rules offline)
//! OPENAI_API_KEY=sk-... t2t convert tasks.txt
//! ```
//!
//! ## Input Shape
//!
//! One task per numbered or bulleted line, detail lines below it:
//!
//! ```text
//! 1. Définir le concept de la campagne
//! Description : Trouver un message central
//! Priorité : Élevée
//! Durée estimée : 3h
//! ```
//!
//! Columns other than TASKLIST, TASK, DESCRIPTION, PRIORITY and
//! ESTIMATED TIME are left empty for manual completion after import.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod export;
pub mod fields;
pub mod model;
pub mod pipeline;
pub mod record;
pub mod parse {
    pub mod classify;
    pub mod compose;
    pub mod extract;
    pub mod group;
    pub mod hierarchy;
    pub mod patterns;
}

use cli::Cli;
use cmd::*;
use model::ModelConfig;
use pipeline::Converter;

fn main() {
    let cli = Cli::parse();

    // Handle commands that don't need a converter first
    match &cli.command {
        Commands::Sample => {
            cmd_sample();
            return;
        }
        Commands::Completions { shell } => {
            cmd_completions(*shell);
            return;
        }
        _ => {}
    }

    let converter = if cli.no_model {
        Converter::new(cli.hierarchy)
    } else {
        let mut config = ModelConfig {
            api_key: cli
                .api_key
                .clone()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                .unwrap_or_default(),
            ..ModelConfig::default()
        };
        if let Some(url) = cli.api_url.clone() {
            config.api_url = url;
        }
        if let Some(model) = cli.model.clone() {
            config.model = model;
        }
        Converter::with_model(cli.hierarchy, config)
    };

    match cli.command {
        Commands::Sample => unreachable!("Sample command handled above"),
        Commands::Completions { .. } => unreachable!("Completions command handled above"),

        Commands::Convert { input, output, format } => {
            cmd_convert(&converter, input, output, format)
        }

        Commands::Preview { input } => cmd_preview(&converter, input),
    }
}
