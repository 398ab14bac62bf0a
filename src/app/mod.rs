// Application layer - Use case interactors

pub mod container;
pub mod history_interactor;
pub mod validate_interactor;

// Re-export interactors
pub use history_interactor::HistoryInteractor;
pub use validate_interactor::{ValidateInteractor, ValidateRequest, ValidationPipeline};
