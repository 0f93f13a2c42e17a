//! Begrepsbro explains Norwegian academic terms for language learners.
//!
//! A [`Gateway`](gateway::Gateway) asks a structured-output LLM provider for a
//! simple Norwegian explanation, a translation into the learner's native
//! language, an analogy and a three-option quiz. Results land in a small
//! [`HistoryStore`](history::HistoryStore) so earlier lookups can be shown
//! again without another provider call.

pub mod api;
pub mod config;
pub mod error;
pub mod explanation;
pub mod gateway;
pub mod history;
pub mod languages;
pub mod providers;

pub use error::{BroError, GenerationError, PersistenceError, Result};
pub use explanation::{GenerationRequest, GenerationResult, QuizItem, QuizOutcome};
pub use gateway::Gateway;
pub use history::{HistoryEntry, HistoryStore};
