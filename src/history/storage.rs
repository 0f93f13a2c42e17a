//! Storage port for the history store, with file and in-memory adapters.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::PersistenceError;

use super::HistoryEntry;

/// Fixed namespace the history is stored under.
pub const HISTORY_NAMESPACE: &str = "begrepsbroen-history";

/// Durable backing for a [`HistoryStore`](super::HistoryStore).
///
/// `save` always receives the full sequence, most-recent-first.
#[cfg_attr(test, mockall::automock)]
pub trait HistoryStorage: Send {
    fn load(&self) -> Result<Vec<HistoryEntry>, PersistenceError>;
    fn save(&self, entries: &[HistoryEntry]) -> Result<(), PersistenceError>;
}

/// History persisted as a JSON array in `<dir>/begrepsbroen-history.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Store the history file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{HISTORY_NAMESPACE}.json")),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStorage for JsonFileStorage {
    /// A missing file is an empty history, not an error.
    fn load(&self) -> Result<Vec<HistoryEntry>, PersistenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) if data.trim().is_empty() => Ok(Vec::new()),
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No history file at {}", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(entries)?;
        // Write-then-rename so a crash never leaves a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Process-local storage. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<Vec<HistoryEntry>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of what was last saved.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<HistoryEntry>, PersistenceError> {
        Ok(self.snapshot())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), PersistenceError> {
        if let Ok(mut slot) = self.entries.lock() {
            *slot = entries.to_vec();
        }
        Ok(())
    }
}
