// History interactor - Bounded list of past validation summaries

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::VideoMetadataReport;
use crate::ports::*;

/// Default number of entries kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Interactor for reading and updating validation history
pub struct HistoryInteractor {
    port: Arc<dyn HistoryPort>,
    limit: usize,
    // Serializes read-modify-write cycles against the store
    lock: Mutex<()>,
}

impl HistoryInteractor {
    pub fn new(port: Arc<dyn HistoryPort>, limit: usize) -> Self {
        Self {
            port,
            limit: limit.max(1),
            lock: Mutex::new(()),
        }
    }

    /// Prepend a summary of the report, dropping the oldest entries past the limit
    pub async fn record(&self, report: &VideoMetadataReport) -> Result<HistoryEntry, DomainError> {
        let _guard = self.lock.lock().await;

        let entry = HistoryEntry::from_report(report, Utc::now());
        let mut entries = self.port.load().await?;
        entries.insert(0, entry.clone());
        entries.truncate(self.limit);
        self.port.store(&entries).await?;

        info!("History saved, {} entries", entries.len());
        Ok(entry)
    }

    /// Entries, newest first
    pub async fn list(&self) -> Result<Vec<HistoryEntry>, DomainError> {
        self.port.load().await
    }

    /// Remove the entry at `index` (0 = newest)
    pub async fn remove(&self, index: usize) -> Result<HistoryEntry, DomainError> {
        let _guard = self.lock.lock().await;

        let mut entries = self.port.load().await?;
        if index >= entries.len() {
            return Err(DomainError::BadArgs(format!(
                "History index {} out of range ({} entries)",
                index,
                entries.len()
            )));
        }
        let removed = entries.remove(index);
        self.port.store(&entries).await?;
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        self.port.store(&[]).await
    }
}
