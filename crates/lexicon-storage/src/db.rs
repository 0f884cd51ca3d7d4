//! RocksDB wrapper for lexicon storage.
//!
//! Provides:
//! - Database open with column family setup (the "schema")
//! - Atomic upsert of one absorption (words + trigrams in a WriteBatch)
//! - Point reads and full listings for inspection

use rocksdb::{IteratorMode, Options, WriteBatch, DB};
use std::path::Path;
use tracing::{debug, info};

use crate::column_families::{
    build_cf_descriptors, ALL_CF_NAMES, CF_ABSORBED_TRIGRAMS, CF_ABSORBED_WORDS,
};
use crate::error::StorageError;
use crate::keys::{TrigramKey, WordKey};
use crate::rows::{StoredTrigram, StoredWord};
use lexicon_types::Trigram;

/// Durable store for absorbed words and trigrams.
///
/// The database handle is released when the value is dropped.
pub struct Storage {
    db: DB,
}

impl Storage {
    /// Open storage at the given path, creating the database and both
    /// column families if they are missing.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        info!("Opening lexicon storage at {:?}", path);

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_max_background_jobs(2);

        let db = DB::open_cf_descriptors(&db_opts, path, build_cf_descriptors())?;
        Ok(Self { db })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily, StorageError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(name.to_string()))
    }

    /// Upsert the words and trigrams of one absorption in a single batch.
    ///
    /// Existing rows with the same key are replaced.
    pub fn put_absorption(
        &self,
        words: &[StoredWord],
        trigrams: &[StoredTrigram],
    ) -> Result<(), StorageError> {
        let words_cf = self.cf(CF_ABSORBED_WORDS)?;
        let trigrams_cf = self.cf(CF_ABSORBED_TRIGRAMS)?;

        let mut batch = WriteBatch::default();
        for row in words {
            let key = WordKey::new(row.word.clone());
            batch.put_cf(words_cf, key.to_bytes(), serde_json::to_vec(row)?);
        }
        for row in trigrams {
            let key = TrigramKey::new(row.trigram.clone());
            batch.put_cf(trigrams_cf, key.to_bytes(), serde_json::to_vec(row)?);
        }

        self.db.write(batch)?;
        debug!(
            words = words.len(),
            trigrams = trigrams.len(),
            "Persisted absorption"
        );
        Ok(())
    }

    /// Get a persisted word row.
    pub fn get_word(&self, word: &str) -> Result<Option<StoredWord>, StorageError> {
        let cf = self.cf(CF_ABSORBED_WORDS)?;
        match self.db.get_cf(cf, WordKey::new(word).to_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Get a persisted trigram row.
    pub fn get_trigram(&self, trigram: &Trigram) -> Result<Option<StoredTrigram>, StorageError> {
        let cf = self.cf(CF_ABSORBED_TRIGRAMS)?;
        match self.db.get_cf(cf, TrigramKey::new(trigram.clone()).to_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// All persisted words, in key order.
    pub fn list_words(&self) -> Result<Vec<StoredWord>, StorageError> {
        let cf = self.cf(CF_ABSORBED_WORDS)?;
        let mut rows = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_, value) = item?;
            rows.push(serde_json::from_slice(&value)?);
        }
        Ok(rows)
    }

    /// All persisted trigrams, in key order.
    pub fn list_trigrams(&self) -> Result<Vec<StoredTrigram>, StorageError> {
        let cf = self.cf(CF_ABSORBED_TRIGRAMS)?;
        let mut rows = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_, value) = item?;
            rows.push(serde_json::from_slice(&value)?);
        }
        Ok(rows)
    }

    /// Flush all column families to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        for cf_name in ALL_CF_NAMES {
            if let Some(cf) = self.db.cf_handle(cf_name) {
                self.db.flush_cf(cf)?;
            }
        }
        Ok(())
    }

    /// Get database statistics.
    pub fn get_stats(&self) -> Result<StorageStats, StorageError> {
        let mut stats = StorageStats::default();

        if let Some(cf) = self.db.cf_handle(CF_ABSORBED_WORDS) {
            stats.word_count = self.count_cf_entries(cf)?;
        }
        if let Some(cf) = self.db.cf_handle(CF_ABSORBED_TRIGRAMS) {
            stats.trigram_count = self.count_cf_entries(cf)?;
        }
        stats.disk_usage_bytes = self.get_disk_usage();

        Ok(stats)
    }

    fn count_cf_entries(&self, cf: &rocksdb::ColumnFamily) -> Result<u64, StorageError> {
        let mut count = 0u64;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            item?;
            count += 1;
        }
        Ok(count)
    }

    fn get_disk_usage(&self) -> u64 {
        let mut total_size = 0u64;
        if let Ok(entries) = std::fs::read_dir(self.db.path()) {
            for entry in entries.flatten() {
                if let Ok(metadata) = entry.metadata() {
                    total_size += metadata.len();
                }
            }
        }
        total_size
    }
}

/// Statistics about the storage.
#[derive(Debug, Default)]
pub struct StorageStats {
    /// Number of persisted words
    pub word_count: u64,
    /// Number of persisted trigrams
    pub trigram_count: u64,
    /// Total disk usage in bytes
    pub disk_usage_bytes: u64,
}
