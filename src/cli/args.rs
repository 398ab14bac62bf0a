//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::output::ReportFormat;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Requirements file (TOML or JSON)
    #[arg(short, long)]
    pub requirements: Option<PathBuf>,

    /// Ask the remote service to confirm codec and FPS
    #[arg(long, conflicts_with = "no_remote")]
    pub remote: bool,

    /// Validate with local checks only
    #[arg(long)]
    pub no_remote: bool,

    /// Base URL of the remote validation service
    #[arg(long)]
    pub remote_url: Option<String>,

    /// Path to the ffprobe binary
    #[arg(long)]
    pub ffprobe: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Do not record this run in history
    #[arg(long)]
    pub no_history: bool,
}

impl ValidateArgs {
    /// `Some` only when one of the remote flags was given
    pub fn remote_flag(&self) -> Option<bool> {
        if self.remote {
            Some(true)
        } else if self.no_remote {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the requirements command
#[derive(Args, Debug)]
pub struct RequirementsArgs {
    /// Requirements file (TOML or JSON)
    #[arg(short, long)]
    pub requirements: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// History file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    #[command(subcommand)]
    pub action: HistoryAction,
}

/// History operations
#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List entries, newest first
    List,
    /// Remove one entry by its index in `list`
    Remove { index: usize },
    /// Remove every entry
    Clear,
}
