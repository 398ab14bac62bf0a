//! ClipGate video validator
//!
//! Validates a video file against configured screen playback requirements.
//!
//! # Usage
//!
//! ```bash
//! clipgate validate --input promo.mp4
//! clipgate validate --input promo.mp4 --remote --format json
//! clipgate requirements --format yaml
//! clipgate history list
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use clipgate::app::container::DefaultAppContainer;
use clipgate::cli::commands::{self, ValidateOutcome, DECODE_FAILURE_MESSAGE};
use clipgate::cli::{Cli, Commands};
use clipgate::config_initialization::{initialize_configuration_hierarchy, log_settings};
use clipgate::utils::logging::{LoggingConfig, LoggingSystem};

/// Main entry point for the ClipGate CLI application
#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    let settings = initialize_configuration_hierarchy(&cli.overrides()).context("Failed to load configuration")?;

    // Initialize logging
    LoggingSystem::new(LoggingConfig {
        level: settings.log.level,
        format: settings.log.format,
    })
    .initialize()?;

    info!("Starting ClipGate {}", env!("CARGO_PKG_VERSION"));
    log_settings(&settings);

    let container = DefaultAppContainer::from_settings(&settings).context("Failed to initialize application")?;

    // Execute the requested command
    let code = match cli.command {
        Commands::Validate(args) => match commands::validate(&container, args).await? {
            ValidateOutcome::Passed => ExitCode::SUCCESS,
            ValidateOutcome::Rejected => ExitCode::from(1),
            ValidateOutcome::Undecodable => {
                eprintln!("{}", DECODE_FAILURE_MESSAGE);
                ExitCode::from(2)
            }
        },
        Commands::Requirements(args) => {
            commands::requirements(&container, args)?;
            ExitCode::SUCCESS
        }
        Commands::History(args) => {
            commands::history(&container, args).await?;
            ExitCode::SUCCESS
        }
        Commands::RemoteHealth => {
            commands::remote_health(&container).await?;
            ExitCode::SUCCESS
        }
    };

    info!("ClipGate completed");
    Ok(code)
}
