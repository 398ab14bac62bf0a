//! ClipGate Video Validation Library
//!
//! Client-side validation of video uploads against screen playback
//! requirements: local probing of duration and dimensions, optional remote
//! confirmation of codec and frame rate, and a per-criterion report.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod ports;
pub mod utils;
pub mod validator;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{Requirements, UploadedFile, VideoMetadataReport};
pub use error::{ClipGateError, ClipGateResult};
