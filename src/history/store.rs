//! Most-recent-first history store with deduplication and eviction.
//!
//! All operations are synchronous. Every mutation writes the full sequence
//! through the storage port; a failed load starts empty and a failed save is
//! logged. Neither is reported to the caller, since the in-memory sequence
//! stays authoritative for the session.

use chrono::Utc;
use tracing::{debug, warn};

use crate::explanation::GenerationResult;

use super::{HistoryEntry, HistoryStorage};

/// Maximum number of entries kept.
pub const HISTORY_CAPACITY: usize = 10;

pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    storage: Box<dyn HistoryStorage>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl HistoryStore {
    /// Load the persisted sequence, degrading to empty on any failure.
    pub fn open(storage: Box<dyn HistoryStorage>) -> Self {
        let mut entries = match storage.load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to load history, starting empty: {}", e);
                Vec::new()
            }
        };
        entries.truncate(HISTORY_CAPACITY);
        debug!(count = entries.len(), "History loaded");
        Self { entries, storage }
    }

    /// Insert a result at the head, replacing any entry for the same
    /// `(term, language_code)` pair and evicting beyond capacity.
    pub fn add(
        &mut self,
        term: &str,
        language_code: &str,
        language_label: &str,
        result: GenerationResult,
    ) -> &HistoryEntry {
        let term = term.trim();
        self.entries.retain(|e| !e.matches(term, language_code));
        self.entries.insert(
            0,
            HistoryEntry {
                id: uuid::Uuid::new_v4().to_string(),
                term: term.to_string(),
                language_code: language_code.to_string(),
                language_label: language_label.to_string(),
                result,
                created_at: Utc::now(),
            },
        );
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist();
        &self.entries[0]
    }

    /// Delete the entry with `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.entries) {
            warn!("Failed to save history: {}", e);
        }
    }
}
