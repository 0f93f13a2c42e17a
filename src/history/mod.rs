//! Recency cache of past explanations.
//!
//! A capacity-bounded, most-recent-first list of results keyed by
//! `(term, language code)`, persisted through a [`HistoryStorage`] port.

pub mod recency;
pub mod storage;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::explanation::GenerationResult;

pub use storage::{HistoryStorage, JsonFileStorage, MemoryStorage, HISTORY_NAMESPACE};
pub use store::{HistoryStore, HISTORY_CAPACITY};

/// One cached explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// UUID v4 assigned when the entry is added.
    pub id: String,
    /// The term as entered, trimmed.
    pub term: String,
    /// Catalog code of the native language; part of the dedup key.
    #[serde(rename = "language")]
    pub language_code: String,
    /// Human-readable language name shown with the result.
    pub language_label: String,
    pub result: GenerationResult,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// `true` if this entry caches the same `(term, language)` pair.
    ///
    /// Terms compare trimmed and case-insensitively; language codes exactly.
    pub fn matches(&self, term: &str, language_code: &str) -> bool {
        self.language_code == language_code && normalize_term(&self.term) == normalize_term(term)
    }
}

/// Comparison form of a term: trimmed and lowercased.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explanation::sample_result;

    #[test]
    fn test_matches_ignores_case_and_surrounding_space() {
        let entry = HistoryEntry {
            id: "1".into(),
            term: "Demokrati".into(),
            language_code: "english".into(),
            language_label: "English".into(),
            result: sample_result("r"),
            created_at: Utc::now(),
        };
        assert!(entry.matches(" demokrati ", "english"));
        assert!(entry.matches("DEMOKRATI", "english"));
        assert!(!entry.matches("demokrati", "polish"));
        assert!(!entry.matches("demokrati.", "english"));
    }

    #[test]
    fn test_normalize_term_handles_non_ascii() {
        assert_eq!(normalize_term("  ØKOSYSTEM "), "økosystem");
    }
}
