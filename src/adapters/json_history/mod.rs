// JSON history adapter - History list persisted as a JSON array file

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Stores history entries in a single JSON file
pub struct JsonHistoryAdapter {
    path: PathBuf,
}

impl JsonHistoryAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HistoryPort for JsonHistoryAdapter {
    async fn load(&self) -> Result<Vec<HistoryEntry>, DomainError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DomainError::FsFail(format!(
                    "Failed to read history {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // A corrupt history file is treated as empty rather than blocking validation
                tracing::warn!("Ignoring unreadable history file {}: {}", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    async fn store(&self, entries: &[HistoryEntry]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::FsFail(format!("Failed to create history directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| DomainError::InternalError(format!("History serialization failed: {}", e)))?;

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to write history: {}", e)))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to replace history file: {}", e)))?;

        Ok(())
    }
}
