//! Column family definitions for RocksDB.
//!
//! - absorbed_words: one row per word, overwritten on every persist
//! - absorbed_trigrams: one row per ordered 3-word tuple

use rocksdb::{ColumnFamilyDescriptor, Options};

/// Column family name for absorbed words
pub const CF_ABSORBED_WORDS: &str = "absorbed_words";

/// Column family name for absorbed trigrams
pub const CF_ABSORBED_TRIGRAMS: &str = "absorbed_trigrams";

/// All column family names
pub const ALL_CF_NAMES: &[&str] = &[CF_ABSORBED_WORDS, CF_ABSORBED_TRIGRAMS];

/// Trigram rows are never rewritten with new data, so compress them harder.
fn trigram_options() -> Options {
    let mut opts = Options::default();
    opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
    opts
}

/// Build all column family descriptors
pub fn build_cf_descriptors() -> Vec<ColumnFamilyDescriptor> {
    vec![
        ColumnFamilyDescriptor::new(CF_ABSORBED_WORDS, Options::default()),
        ColumnFamilyDescriptor::new(CF_ABSORBED_TRIGRAMS, trigram_options()),
    ]
}
