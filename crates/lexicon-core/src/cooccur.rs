//! In-memory co-occurrence field.
//!
//! Pair and triple counters keyed by token id. Both maps auto-vivify on
//! increment and can be read concurrently by a sampler while the lexicon
//! writes. Reads are per-key consistent only: a reader may see the pair
//! updates of an injection before its triple update.

use dashmap::DashMap;
use std::collections::HashMap;

use crate::field::{CooccurrenceStore, TokenId, Tokenizer};

#[derive(Debug, Default)]
pub struct CooccurField {
    pairs: DashMap<TokenId, HashMap<TokenId, u64>>,
    triples: DashMap<(TokenId, TokenId), HashMap<TokenId, u64>>,
}

impl CooccurField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count adjacent pairs and triples over the encoded corpus.
    pub fn from_text(corpus: &str, tokenizer: &dyn Tokenizer) -> Self {
        let field = Self::new();
        let ids = tokenizer.encode(corpus);
        for window in ids.windows(2) {
            field.increment_pair(window[0], window[1], 1);
        }
        for window in ids.windows(3) {
            field.increment_triple((window[0], window[1]), window[2], 1);
        }
        field
    }

    pub fn pair_count(&self, prev: TokenId, next: TokenId) -> u64 {
        self.pairs
            .get(&prev)
            .and_then(|row| row.get(&next).copied())
            .unwrap_or(0)
    }

    pub fn triple_count(&self, context: (TokenId, TokenId), next: TokenId) -> u64 {
        self.triples
            .get(&context)
            .and_then(|row| row.get(&next).copied())
            .unwrap_or(0)
    }

    /// Sum of all pair counts.
    pub fn total_pair_count(&self) -> u64 {
        self.pairs
            .iter()
            .flat_map(|row| row.value().values().copied().collect::<Vec<_>>())
            .fold(0u64, u64::saturating_add)
    }

    /// Sum of all triple counts.
    pub fn total_triple_count(&self) -> u64 {
        self.triples
            .iter()
            .flat_map(|row| row.value().values().copied().collect::<Vec<_>>())
            .fold(0u64, u64::saturating_add)
    }
}

impl CooccurrenceStore for CooccurField {
    /// Counts saturate at `u64::MAX` instead of wrapping.
    fn increment_pair(&self, prev: TokenId, next: TokenId, by: u64) {
        let mut row = self.pairs.entry(prev).or_default();
        let count = row.entry(next).or_insert(0);
        *count = count.saturating_add(by);
    }

    fn increment_triple(&self, context: (TokenId, TokenId), next: TokenId, by: u64) {
        let mut row = self.triples.entry(context).or_default();
        let count = row.entry(next).or_insert(0);
        *count = count.saturating_add(by);
    }
}
