//! CLI definitions for AnySite.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AnySite CLI.
#[derive(Parser)]
#[command(name = "anysite")]
#[command(about = "Turn any website into callable, schema-described tools")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.anysite/config.toml)
    #[arg(short, long, global = true, env = "ANYSITE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Analyze a website and print discovered tools
    Analyze {
        /// Website URL
        url: String,

        /// Skip the LLM enrichment stage
        #[arg(long)]
        skip_llm: bool,

        /// Print the discovery result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Discover a website's tools, then run one of them
    Call {
        /// Website URL
        url: String,

        /// Tool name as printed by `analyze`
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long)]
        args: Option<String>,

        /// Skip the LLM enrichment stage
        #[arg(long)]
        skip_llm: bool,
    },
}
