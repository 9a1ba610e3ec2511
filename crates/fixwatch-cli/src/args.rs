use clap::{Parser, Subcommand, ValueEnum};
use fixwatch_types::BugCategory;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fixwatch")]
#[command(about = "Live cockpit for autonomous CI/CD healing agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the agent gateway. Falls back to FIXWATCH_GATEWAY_URL,
    /// then the config file, then http://localhost:8000.
    #[arg(long, global = true)]
    pub gateway_url: Option<String>,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an agent run and watch it live
    Run {
        #[arg(long)]
        repo_url: String,

        #[arg(long, default_value = "TEAM AMD")]
        team: String,

        #[arg(long, default_value = "AZHAN ALI")]
        leader: String,
    },

    /// Attach to an agent run that is already in progress
    Watch {
        #[arg(long)]
        run_id: String,
    },

    /// Export the current fix table.
    ///
    /// CSV always covers the complete table; --category only narrows the
    /// report format.
    Export {
        #[arg(long)]
        run_id: String,

        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Narrow the report to one bug category (e.g. SYNTAX)
        #[arg(long)]
        category: Option<BugCategory>,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Download the gateway's complete results document
    Results {
        #[arg(long)]
        run_id: String,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Check configuration and gateway health
    Doctor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Report,
}
