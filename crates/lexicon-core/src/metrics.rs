//! Lock-free counters for lexicon activity.
//!
//! Counters can be read from telemetry without taking the lexicon lock.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct LexiconMetrics {
    pub absorptions: AtomicU64,
    pub words_absorbed: AtomicU64,
    pub words_reinforced: AtomicU64,
    pub trigrams_absorbed: AtomicU64,
    pub injections_applied: AtomicU64,
    pub injections_skipped: AtomicU64,
    pub decay_passes: AtomicU64,
    pub words_decayed: AtomicU64,
    pub persist_failures: AtomicU64,
}

impl LexiconMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    /// Get all counts as a snapshot.
    pub fn snapshot(&self) -> LexiconMetricsSnapshot {
        LexiconMetricsSnapshot {
            absorptions: self.absorptions.load(Ordering::Relaxed),
            words_absorbed: self.words_absorbed.load(Ordering::Relaxed),
            words_reinforced: self.words_reinforced.load(Ordering::Relaxed),
            trigrams_absorbed: self.trigrams_absorbed.load(Ordering::Relaxed),
            injections_applied: self.injections_applied.load(Ordering::Relaxed),
            injections_skipped: self.injections_skipped.load(Ordering::Relaxed),
            decay_passes: self.decay_passes.load(Ordering::Relaxed),
            words_decayed: self.words_decayed.load(Ordering::Relaxed),
            persist_failures: self.persist_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of lexicon metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexiconMetricsSnapshot {
    pub absorptions: u64,
    pub words_absorbed: u64,
    pub words_reinforced: u64,
    pub trigrams_absorbed: u64,
    pub injections_applied: u64,
    pub injections_skipped: u64,
    pub decay_passes: u64,
    pub words_decayed: u64,
    pub persist_failures: u64,
}

impl LexiconMetricsSnapshot {
    /// Injection attempts, applied or not. Equals `trigrams_absorbed`.
    pub fn injection_attempts(&self) -> u64 {
        self.injections_applied + self.injections_skipped
    }
}
