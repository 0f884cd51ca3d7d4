//! # lexicon-types
//!
//! Shared domain types for the dynamic lexicon.
//!
//! This crate defines the data structures used throughout the system:
//! - Trigrams: ordered 3-word windows extracted from text
//! - Absorption records: immutable log entries of what an absorb call learned
//! - Stats: computed snapshots of lexicon growth
//! - Settings: layered configuration
//!
//! ## Usage
//!
//! ```rust
//! use lexicon_types::{AbsorptionRecord, Trigram};
//!
//! let record = AbsorptionRecord::new(
//!     "user",
//!     vec!["love".to_string()],
//!     vec![Trigram::new("love", "love", "love")],
//! );
//! assert_eq!(record.count(), 2);
//! ```

pub mod config;
pub mod error;
pub mod record;
pub mod stats;
pub mod trigram;

pub use config::{LexiconConfig, PersistenceSettings, Settings};
pub use error::LexiconError;
pub use record::{AbsorptionRecord, SOURCE_USER};
pub use stats::LexiconStats;
pub use trigram::Trigram;
