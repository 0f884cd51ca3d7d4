//! Durable mirrors of absorbed state.
//!
//! The backend is chosen once from settings: RocksDB when persistence is
//! enabled with a path, otherwise a no-op. RocksDB calls are blocking and
//! run on the blocking thread pool so the async workers never stall.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use lexicon_storage::{Storage, StoredTrigram, StoredWord};
use lexicon_types::PersistenceSettings;
use tracing::{debug, info};

use crate::error::CoreError;

/// Rows produced by one absorption.
#[derive(Debug, Clone, Default)]
pub struct PersistBatch {
    pub words: Vec<StoredWord>,
    pub trigrams: Vec<StoredTrigram>,
}

impl PersistBatch {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.trigrams.is_empty()
    }
}

/// Durable store capability used by [`crate::shared::SharedLexicon`].
#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// False for backends that discard everything.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Open the store and make sure both tables exist.
    async fn open(&mut self) -> Result<(), CoreError>;

    /// Upsert the rows of one absorption.
    async fn persist(&mut self, batch: PersistBatch) -> Result<(), CoreError>;

    /// Flush and release the store.
    async fn close(&mut self) -> Result<(), CoreError>;
}

/// Backend used when persistence is not configured.
#[derive(Debug, Default)]
pub struct NoopPersistence;

#[async_trait]
impl PersistenceBackend for NoopPersistence {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn open(&mut self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn persist(&mut self, _batch: PersistBatch) -> Result<(), CoreError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// RocksDB-backed persistence.
///
/// The database is opened lazily by [`PersistenceBackend::open`] and
/// released on [`PersistenceBackend::close`] or when dropped.
pub struct RocksPersistence {
    path: PathBuf,
    storage: Option<Arc<Storage>>,
}

impl RocksPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            storage: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<Arc<Storage>, CoreError> {
        self.storage
            .clone()
            .ok_or_else(|| CoreError::Lifecycle(format!("store at {:?} is not open", self.path)))
    }
}

#[async_trait]
impl PersistenceBackend for RocksPersistence {
    fn name(&self) -> &'static str {
        "rocksdb"
    }

    async fn open(&mut self) -> Result<(), CoreError> {
        if self.is_open() {
            return Ok(());
        }
        let path = self.path.clone();
        let storage = tokio::task::spawn_blocking(move || Storage::open(&path)).await??;
        self.storage = Some(Arc::new(storage));
        info!(path = ?self.path, "Lexicon store opened");
        Ok(())
    }

    async fn persist(&mut self, batch: PersistBatch) -> Result<(), CoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let storage = self.storage()?;
        let (words, trigrams) = (batch.words.len(), batch.trigrams.len());
        tokio::task::spawn_blocking(move || {
            storage.put_absorption(&batch.words, &batch.trigrams)
        })
        .await??;
        debug!(words, trigrams, "Absorption persisted");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), CoreError> {
        let Some(storage) = self.storage.take() else {
            return Ok(());
        };
        tokio::task::spawn_blocking(move || storage.flush()).await??;
        info!(path = ?self.path, "Lexicon store closed");
        Ok(())
    }
}

/// Pick the backend for the given settings.
pub fn backend_from_settings(settings: &PersistenceSettings) -> Box<dyn PersistenceBackend> {
    match settings.active_path() {
        Some(path) => Box::new(RocksPersistence::new(path)),
        None => Box::new(NoopPersistence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lexicon_types::Trigram;
    use tempfile::TempDir;

    fn batch() -> PersistBatch {
        PersistBatch {
            words: vec![StoredWord {
                word: "drift".to_string(),
                weight: 1.0,
                source: "user".to_string(),
                timestamp: Utc::now(),
            }],
            trigrams: vec![StoredTrigram {
                trigram: Trigram::new("we", "drift", "on"),
                source: "user".to_string(),
                timestamp: Utc::now(),
            }],
        }
    }

    #[test]
    fn test_backend_selection() {
        let disabled = PersistenceSettings::default();
        assert_eq!(backend_from_settings(&disabled).name(), "noop");

        let enabled = PersistenceSettings {
            enabled: true,
            db_path: Some("/tmp/lexicon-test".to_string()),
        };
        assert_eq!(backend_from_settings(&enabled).name(), "rocksdb");

        let no_path = PersistenceSettings {
            enabled: true,
            db_path: None,
        };
        assert!(!backend_from_settings(&no_path).is_enabled());
    }

    #[tokio::test]
    async fn test_noop_accepts_everything() {
        let mut backend = NoopPersistence;
        backend.open().await.unwrap();
        backend.persist(batch()).await.unwrap();
        backend.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_rocks_persist_requires_open() {
        let temp = TempDir::new().unwrap();
        let mut backend = RocksPersistence::new(temp.path());
        let result = backend.persist(batch()).await;
        assert!(matches!(result, Err(CoreError::Lifecycle(_))));
    }

    #[tokio::test]
    async fn test_rocks_roundtrip_through_close() {
        let temp = TempDir::new().unwrap();
        let mut backend = RocksPersistence::new(temp.path());

        backend.open().await.unwrap();
        assert!(backend.is_open());
        backend.persist(batch()).await.unwrap();
        backend.close().await.unwrap();
        assert!(!backend.is_open());

        let storage = Storage::open(temp.path()).unwrap();
        assert_eq!(storage.get_word("drift").unwrap().unwrap().weight, 1.0);
        assert!(storage
            .get_trigram(&Trigram::new("we", "drift", "on"))
            .unwrap()
            .is_some());
    }
}
