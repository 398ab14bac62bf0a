//! Command implementations

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::container::AppContainer;
use crate::app::ValidateRequest;
use crate::cli::args::{HistoryAction, HistoryArgs, RequirementsArgs, ValidateArgs};
use crate::domain::model::UploadedFile;
use crate::error::ClipGateError;
use crate::output::ReportWriter;

/// Shown instead of decoder details when a file cannot be read as video
pub const DECODE_FAILURE_MESSAGE: &str = "Could not process this video. Please try another file.";

/// Outcome of the validate command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateOutcome {
    /// Report produced, every criterion passed
    Passed,
    /// Report produced, at least one criterion failed
    Rejected,
    /// The file could not be decoded; no report
    Undecodable,
}

/// Execute the validate command
pub async fn validate(container: &dyn AppContainer, args: ValidateArgs) -> Result<ValidateOutcome> {
    info!("Starting validate operation");
    info!("Input: {}", args.input.display());

    if !args.input.exists() {
        return Err(ClipGateError::InputFileNotFound {
            path: args.input.display().to_string(),
        }
        .into());
    }

    let file = UploadedFile::from_path(&args.input)
        .await
        .with_context(|| format!("Failed to read input file {}", args.input.display()))?;

    let mut request = ValidateRequest::new(file);
    if args.no_history {
        request = request.without_history();
    }

    let report = match container.validate_interactor().execute(request).await {
        Ok(report) => report,
        Err(e) if e.is_decode_failure() => {
            warn!("Decode failure: {}", e);
            return Ok(ValidateOutcome::Undecodable);
        }
        Err(e) => return Err(ClipGateError::Domain(e)).context("Validation failed"),
    };

    let rendered = ReportWriter::new(args.format)
        .render_report(&report)
        .context("Failed to render report")?;
    print!("{}", rendered);

    if report.is_valid {
        info!("Validate operation completed: passed");
        Ok(ValidateOutcome::Passed)
    } else {
        info!("Validate operation completed: failed {:?}", report.failed_criteria());
        Ok(ValidateOutcome::Rejected)
    }
}

/// Execute the requirements command
pub fn requirements(container: &dyn AppContainer, args: RequirementsArgs) -> Result<()> {
    let rendered = ReportWriter::new(args.format)
        .render_requirements(&container.requirements())
        .context("Failed to render requirements")?;
    print!("{}", rendered);
    Ok(())
}

/// Execute the history command
pub async fn history(container: &dyn AppContainer, args: HistoryArgs) -> Result<()> {
    let history = container.history_interactor();

    match args.action {
        HistoryAction::List => {
            let entries = history.list().await.context("Failed to load history")?;
            let rendered = ReportWriter::new(args.format)
                .render_history(&entries)
                .context("Failed to render history")?;
            print!("{}", rendered);
        }
        HistoryAction::Remove { index } => {
            let removed = history.remove(index).await.context("Failed to remove history entry")?;
            println!("Removed {}", removed.file_name);
        }
        HistoryAction::Clear => {
            history.clear().await.context("Failed to clear history")?;
            println!("History cleared");
        }
    }
    Ok(())
}

/// Execute the remote-health command
pub async fn remote_health(container: &dyn AppContainer) -> Result<()> {
    let healthy = container
        .remote()
        .health()
        .await
        .context("Remote validation service is not reachable")?;

    if healthy {
        println!("Remote validation service: ✓ available");
        Ok(())
    } else {
        Err(anyhow::anyhow!("Remote validation service answered with an error status"))
    }
}
