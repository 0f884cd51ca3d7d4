//! Storage layer for the lexicon.
//!
//! Provides RocksDB-backed persistence of absorbed state with:
//! - One column family per table (absorbed words, absorbed trigrams)
//! - Upsert semantics keyed by word and by ordered 3-word tuple
//! - Atomic writes of a whole absorption via WriteBatch

pub mod column_families;
pub mod db;
pub mod error;
pub mod keys;
pub mod rows;

pub use db::{Storage, StorageStats};
pub use error::StorageError;
pub use keys::{TrigramKey, WordKey};
pub use rows::{StoredTrigram, StoredWord};
