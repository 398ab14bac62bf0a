//! Report rendering module

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod writer;

pub use writer::ReportWriter;

/// Output format for reports and listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
}
