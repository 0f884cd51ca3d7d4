//! Absorption records.
//!
//! A record is created once per absorb call and lists only what was new in
//! that call. Reinforcements of already-known words are not reported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::trigram::Trigram;

/// Source tag for text typed by the user.
pub const SOURCE_USER: &str = "user";

/// What a single absorb call learned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsorptionRecord {
    /// When the absorption happened
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    /// Free-form origin tag ("user" or "self" by convention)
    pub source: String,

    /// Newly absorbed words, in extraction order
    #[serde(default)]
    pub words: Vec<String>,

    /// Newly absorbed trigrams, in extraction order
    #[serde(default)]
    pub trigrams: Vec<Trigram>,
}

impl AbsorptionRecord {
    /// Create a record stamped with the current time.
    pub fn new(source: impl Into<String>, words: Vec<String>, trigrams: Vec<Trigram>) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.into(),
            words,
            trigrams,
        }
    }

    /// Number of new patterns (words plus trigrams).
    pub fn count(&self) -> usize {
        self.words.len() + self.trigrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
