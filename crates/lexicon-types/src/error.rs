//! Error types for the lexicon system.

use thiserror::Error;

/// Unified error type for lexicon domain operations.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
