use clap::Parser;

use crate::cmd::Commands;
use crate::fields::HierarchyPolicy;

/// Text-to-Teamwork converter CLI.
/// Reads a task document and emits an import sheet for Teamwork Projects.
#[derive(Parser)]
#[command(name = "t2t", version, about = "Convert task documents into Teamwork import sheets")]
pub struct Cli {
    /// How numbered lines split into tasklists and tasks: code-prefix | depth.
    #[arg(long, value_enum, global = true, default_value_t = HierarchyPolicy::CodePrefix)]
    pub hierarchy: HierarchyPolicy,

    /// Skip the model-assisted extractor and parse with the rules only.
    #[arg(long, global = true)]
    pub no_model: bool,

    /// API key for the completion endpoint. Falls back to OPENAI_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Chat-completions URL the model extractor posts to.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Model name sent with each completion request.
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}
