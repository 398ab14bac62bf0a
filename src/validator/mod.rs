//! Validation stages
//!
//! The local stage probes the file and checks size, duration and resolution.
//! The assembler folds in the container check and any remote confirmation to
//! produce the final [`VideoMetadataReport`](crate::domain::model::VideoMetadataReport).

pub mod assembler;
pub mod local;

pub use assembler::MetadataAssembler;
pub use local::LocalValidationEngine;
