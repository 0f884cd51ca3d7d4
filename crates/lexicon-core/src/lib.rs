//! # lexicon-core
//!
//! Dynamic lexicon growth: the field grows through conversation.
//!
//! Incoming text is split into words and trigrams. Unseen words are
//! absorbed with the caller's boost, known words are reinforced, and every
//! unseen trigram is injected once into a shared co-occurrence store that
//! the generation path samples from. A periodic decay pass fades words
//! that stop being reinforced.
//!
//! ## Layers
//!
//! - [`extract`]: pure word/trigram extraction
//! - [`field`]: capability traits for the tokenizer and co-occurrence store
//! - [`lexicon::Lexicon`]: the single-threaded engine
//! - [`shared::SharedLexicon`]: one-lock wrapper with optional persistence
//! - [`decay_job`]: background decay loop
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lexicon_core::{CharTokenizer, CooccurField, Lexicon, SharedLexicon};
//! use lexicon_types::LexiconConfig;
//!
//! # async fn run() -> Result<(), lexicon_core::CoreError> {
//! let corpus = "the haze speaks with resonance";
//! let tokenizer = Arc::new(CharTokenizer::from_text(corpus));
//! let field = Arc::new(CooccurField::from_text(corpus, tokenizer.as_ref()));
//! let lexicon = Lexicon::new(tokenizer, field, LexiconConfig::default())?;
//! let shared = SharedLexicon::in_memory(lexicon);
//!
//! let record = shared.absorb("I love the way haze speaks", "user", 1.0).await?;
//! println!("absorbed {} new patterns", record.count());
//! # Ok(())
//! # }
//! ```

pub mod cooccur;
pub mod decay_job;
pub mod error;
pub mod extract;
pub mod field;
pub mod lexicon;
pub mod metrics;
pub mod persistence;
pub mod shared;
pub mod tokenizer;

pub use cooccur::CooccurField;
pub use decay_job::spawn_decay_job;
pub use error::CoreError;
pub use extract::{extract_trigrams, extract_words};
pub use field::{CooccurrenceStore, TokenId, Tokenizer};
pub use lexicon::Lexicon;
pub use metrics::{LexiconMetrics, LexiconMetricsSnapshot};
pub use persistence::{backend_from_settings, NoopPersistence, PersistBatch, PersistenceBackend, RocksPersistence};
pub use shared::{LifecycleState, SharedLexicon};
pub use tokenizer::CharTokenizer;
