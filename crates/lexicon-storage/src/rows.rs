//! Persisted row types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lexicon_types::Trigram;

/// Row in the absorbed_words table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredWord {
    pub word: String,
    /// Weight at the time the row was written
    pub weight: f64,
    pub source: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Row in the absorbed_trigrams table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTrigram {
    pub trigram: Trigram,
    pub source: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}
