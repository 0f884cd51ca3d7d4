//! End-to-end test infrastructure for the lexicon.
//!
//! Provides a shared TestHarness wiring a character tokenizer, a
//! co-occurrence field and an on-disk store in a temp directory.

use std::path::PathBuf;
use std::sync::Arc;

use lexicon_core::{CharTokenizer, CooccurField, SharedLexicon};
use lexicon_storage::Storage;
use lexicon_types::{PersistenceSettings, Settings};

/// Corpus the harness tokenizer and field are built from.
pub const TEST_CORPUS: &str = "the quick brown fox jumps over the lazy dog. \
the haze speaks and the field listens.";

/// Shared test harness for E2E tests.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Path of the durable store
    pub db_path: PathBuf,
    /// Settings with persistence enabled at `db_path`
    pub settings: Settings,
    /// Tokenizer shared with the lexicon
    pub tokenizer: Arc<CharTokenizer>,
    /// Field shared with the lexicon; read it to observe injections
    pub field: Arc<CooccurField>,
}

impl TestHarness {
    /// Create a harness with persistence enabled in a fresh temp directory.
    pub fn new() -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("lexicon-db");

        let settings = Settings {
            persistence: PersistenceSettings {
                enabled: true,
                db_path: Some(db_path.to_string_lossy().to_string()),
            },
            ..Default::default()
        };

        let tokenizer = Arc::new(CharTokenizer::from_text(TEST_CORPUS));
        let field = Arc::new(CooccurField::from_text(TEST_CORPUS, tokenizer.as_ref()));

        Self {
            _temp_dir: temp_dir,
            db_path,
            settings,
            tokenizer,
            field,
        }
    }

    /// Build a wrapped lexicon over the harness tokenizer, field and settings.
    pub fn lexicon(&self) -> SharedLexicon {
        SharedLexicon::from_settings(self.tokenizer.clone(), self.field.clone(), &self.settings)
            .expect("Failed to create lexicon")
    }

    /// Open the store directly. The lexicon must be closed first.
    pub fn open_storage(&self) -> Storage {
        Storage::open(&self.db_path).expect("Failed to open test storage")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
