//! One-lock wrapper around [`Lexicon`] with optional persistence.
//!
//! Every public operation holds the same `tokio::sync::Mutex` for its whole
//! duration, reads included. An absorption's field injection (pair counts
//! then triple count) and its persistence therefore complete before any
//! other operation on this instance can start.
//!
//! The lock does not cover readers of the co-occurrence store that go
//! around this wrapper (the generation path). Those readers either share a
//! lock with the store itself or accept eventually-consistent counts.
//!
//! Lifecycle: `Unattached -> Attached -> Closed`. In-memory operations work
//! in every state; only the attached state persists. Cancelling an
//! `absorb` while it awaits persistence leaves the in-memory absorption
//! applied and the store possibly behind.

use std::future::Future;
use std::sync::Arc;

use lexicon_storage::{StoredTrigram, StoredWord};
use lexicon_types::{AbsorptionRecord, LexiconStats, Settings};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::field::{CooccurrenceStore, Tokenizer};
use crate::lexicon::Lexicon;
use crate::metrics::LexiconMetrics;
use crate::persistence::{backend_from_settings, NoopPersistence, PersistBatch, PersistenceBackend};

/// Attachment state of the durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Store not opened yet; running in memory
    Unattached,
    /// Store open; absorptions are persisted
    Attached,
    /// Store released; cannot be reattached
    Closed,
}

struct Inner {
    lexicon: Lexicon,
    backend: Box<dyn PersistenceBackend>,
    state: LifecycleState,
}

pub struct SharedLexicon {
    inner: Mutex<Inner>,
    metrics: Arc<LexiconMetrics>,
}

impl SharedLexicon {
    pub fn new(lexicon: Lexicon, backend: Box<dyn PersistenceBackend>) -> Self {
        let metrics = lexicon.metrics();
        Self {
            inner: Mutex::new(Inner {
                lexicon,
                backend,
                state: LifecycleState::Unattached,
            }),
            metrics,
        }
    }

    /// Wrapper that never persists.
    pub fn in_memory(lexicon: Lexicon) -> Self {
        Self::new(lexicon, Box::new(NoopPersistence))
    }

    /// Build the lexicon and pick the persistence backend from settings.
    pub fn from_settings(
        tokenizer: Arc<dyn Tokenizer>,
        field: Arc<dyn CooccurrenceStore>,
        settings: &Settings,
    ) -> Result<Self, CoreError> {
        let lexicon = Lexicon::new(tokenizer, field, settings.lexicon.clone())?;
        Ok(Self::new(lexicon, backend_from_settings(&settings.persistence)))
    }

    /// Open the durable store.
    ///
    /// Attaching twice is a no-op. Attaching after close is an error.
    pub async fn attach(&self) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().await;
        match inner.state {
            LifecycleState::Attached => Ok(()),
            LifecycleState::Closed => Err(CoreError::Lifecycle(
                "cannot attach a closed lexicon".to_string(),
            )),
            LifecycleState::Unattached => {
                inner.backend.open().await?;
                inner.state = LifecycleState::Attached;
                info!(backend = inner.backend.name(), "Lexicon attached");
                Ok(())
            }
        }
    }

    /// Release the durable store.
    ///
    /// The state becomes `Closed` even if flushing fails; the error is
    /// still returned.
    pub async fn close(&self) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().await;
        let was = inner.state;
        inner.state = LifecycleState::Closed;
        if was == LifecycleState::Attached {
            inner.backend.close().await?;
            info!(backend = inner.backend.name(), "Lexicon closed");
        }
        Ok(())
    }

    /// Attach, run `f`, then close on every exit path.
    ///
    /// An error from `f` takes precedence over an error from closing.
    pub async fn scoped<'a, F, Fut, T>(&'a self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&'a SharedLexicon) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        self.attach().await?;
        let result = f(self).await;
        let closed = self.close().await;
        match (result, closed) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
            (Ok(value), Ok(())) => Ok(value),
        }
    }

    pub async fn state(&self) -> LifecycleState {
        self.inner.lock().await.state
    }

    /// Absorb `text` and, when attached, persist what was new before the
    /// lock is released.
    ///
    /// A persistence error is returned after the in-memory absorption has
    /// already been applied; retry persistence rather than re-absorbing.
    pub async fn absorb(
        &self,
        text: &str,
        source: &str,
        boost: f64,
    ) -> Result<AbsorptionRecord, CoreError> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        let record = inner.lexicon.absorb(text, source, boost);

        if inner.state == LifecycleState::Attached
            && inner.backend.is_enabled()
            && !record.is_empty()
        {
            let batch = persist_batch(&inner.lexicon, &record);
            if let Err(e) = inner.backend.persist(batch).await {
                LexiconMetrics::add(&self.metrics.persist_failures, 1);
                warn!(error = %e, new_patterns = record.count(), "Failed to persist absorption");
                return Err(e);
            }
        }

        Ok(record)
    }

    /// Run one decay pass; returns the number of words forgotten.
    pub async fn decay(&self) -> usize {
        self.inner.lock().await.lexicon.decay()
    }

    pub async fn get_resonant_words(&self, n: usize) -> Vec<String> {
        self.inner.lock().await.lexicon.get_resonant_words(n)
    }

    pub async fn stats(&self) -> LexiconStats {
        self.inner.lock().await.lexicon.stats()
    }

    /// Read the lexicon under the lock.
    pub async fn with_lexicon<R>(&self, f: impl FnOnce(&Lexicon) -> R) -> R {
        let inner = self.inner.lock().await;
        f(&inner.lexicon)
    }

    /// Counters readable without taking the lock.
    pub fn metrics(&self) -> Arc<LexiconMetrics> {
        Arc::clone(&self.metrics)
    }
}

/// Rows for the new words and trigrams of `record`, with current weights.
fn persist_batch(lexicon: &Lexicon, record: &AbsorptionRecord) -> PersistBatch {
    let words = record
        .words
        .iter()
        .filter_map(|word| {
            lexicon.weight(word).map(|weight| StoredWord {
                word: word.clone(),
                weight,
                source: record.source.clone(),
                timestamp: record.timestamp,
            })
        })
        .collect();

    let trigrams = record
        .trigrams
        .iter()
        .map(|trigram| StoredTrigram {
            trigram: trigram.clone(),
            source: record.source.clone(),
            timestamp: record.timestamp,
        })
        .collect();

    PersistBatch { words, trigrams }
}
