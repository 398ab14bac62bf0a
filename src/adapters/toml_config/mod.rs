// TOML config adapter - Requirements loaded from TOML or JSON files

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Requirements bundled with the binary
const EMBEDDED_REQUIREMENTS: &str = include_str!("../../../config/requirements.toml");

/// A requirements document, either wrapped in a `requirements` key or bare
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequirementsDocument {
    Wrapped { requirements: RequirementsConfig },
    Bare(RequirementsConfig),
}

impl RequirementsDocument {
    fn into_config(self) -> RequirementsConfig {
        match self {
            RequirementsDocument::Wrapped { requirements } => requirements,
            RequirementsDocument::Bare(config) => config,
        }
    }
}

/// Requirements source backed by a file, or by the embedded defaults
pub struct TomlConfigAdapter {
    path: Option<PathBuf>,
}

impl TomlConfigAdapter {
    /// Read requirements from the given file
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Use the requirements compiled into the binary
    pub fn embedded() -> Self {
        Self { path: None }
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parse a TOML requirements document
    pub fn parse_toml(content: &str) -> Result<RequirementsConfig, DomainError> {
        let document: RequirementsDocument = toml::from_str(content)
            .map_err(|e| DomainError::InvalidRequirements(format!("Failed to parse TOML: {}", e)))?;
        Ok(document.into_config())
    }

    /// Parse a JSON requirements document
    pub fn parse_json(content: &str) -> Result<RequirementsConfig, DomainError> {
        let document: RequirementsDocument = serde_json::from_str(content)
            .map_err(|e| DomainError::InvalidRequirements(format!("Failed to parse JSON: {}", e)))?;
        Ok(document.into_config())
    }

    fn read_config(path: &Path) -> Result<RequirementsConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::FsFail(format!("Failed to read requirements file {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_toml(&content)
        }
    }
}

impl RequirementsPort for TomlConfigAdapter {
    fn load_requirements(&self) -> Result<Requirements, DomainError> {
        let config = match &self.path {
            Some(path) => {
                tracing::info!("Loading requirements from {}", path.display());
                Self::read_config(path)?
            }
            None => {
                tracing::debug!("Using embedded requirements");
                Self::parse_toml(EMBEDDED_REQUIREMENTS)?
            }
        };

        Requirements::from_config(config)
    }
}
