//! Error types for the lexicon engine.

use lexicon_storage::StorageError;
use lexicon_types::LexiconError;
use thiserror::Error;

/// Errors surfaced by the engine and its wrapper.
///
/// Absorbing text never fails on its own; errors come from configuration,
/// the durable store, or lifecycle misuse.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Durable store operation failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid configuration or input
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// Operation not allowed in the current lifecycle state
    #[error("Lifecycle error: {0}")]
    Lifecycle(String),

    /// Blocking storage task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Lifecycle("lexicon is closed".to_string());
        assert_eq!(err.to_string(), "Lifecycle error: lexicon is closed");

        let err: CoreError = LexiconError::Config("decay_rate".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Lexicon error: Configuration error: decay_rate"
        );
    }

    #[test]
    fn test_from_storage_error() {
        let err: CoreError = StorageError::ColumnFamilyNotFound("absorbed_words".to_string()).into();
        assert!(matches!(err, CoreError::Storage(_)));
    }
}
