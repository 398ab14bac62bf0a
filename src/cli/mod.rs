//! CLI module for ClipGate
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config_initialization::CliOverrides;
use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;

/// ClipGate video validator
///
/// Checks a video file against configured playback requirements (duration,
/// container, codec, frame rate, resolution and size) and reports which
/// display screen it fits.
#[derive(Parser, Debug)]
#[command(name = "clipgate")]
#[command(about = "ClipGate - Validate videos against screen playback requirements")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Settings file (default: ./clipgate.toml or config/clipgate.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a video file
    Validate(args::ValidateArgs),
    /// Show the active requirements
    Requirements(args::RequirementsArgs),
    /// Show or edit validation history
    History(args::HistoryArgs),
    /// Check that the remote validation service is reachable
    RemoteHealth,
}

impl Cli {
    /// Settings overrides carried by the parsed arguments
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            config: self.config.clone(),
            log_level: self.log_level,
            log_format: self.log_format,
            ..Default::default()
        };

        if let Commands::Validate(args) = &self.command {
            overrides.requirements = args.requirements.clone();
            overrides.remote = args.remote_flag();
            overrides.remote_url = args.remote_url.clone();
            overrides.ffprobe = args.ffprobe.clone();
        }
        if let Commands::Requirements(args) = &self.command {
            overrides.requirements = args.requirements.clone();
        }
        if let Commands::History(args) = &self.command {
            overrides.history_path = args.file.clone();
        }
        overrides
    }
}
