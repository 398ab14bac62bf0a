// Domain layer - Core validation types and rules

pub mod errors;
pub mod model;
pub mod rules;
