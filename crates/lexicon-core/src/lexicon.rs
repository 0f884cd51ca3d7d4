//! The lexicon engine.
//!
//! Owns the absorbed-word weights, the absorbed-trigram set and a bounded
//! history of absorption records. Not synchronized: wrap it in
//! [`crate::shared::SharedLexicon`] when more than one task touches it.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use lexicon_types::{AbsorptionRecord, LexiconConfig, LexiconError, LexiconStats, Trigram};
use tracing::{debug, trace, warn};

use crate::error::CoreError;
use crate::extract::{extract_trigrams, extract_words};
use crate::field::{CooccurrenceStore, TokenId, Tokenizer};
use crate::metrics::LexiconMetrics;

/// Upper bound for any word weight.
pub const MAX_WEIGHT: f64 = 2.0;

/// Fixed weight added when a known word is seen again.
pub const REINFORCEMENT: f64 = 0.1;

/// Words whose decayed weight falls below this are forgotten.
pub const REMOVAL_THRESHOLD: f64 = 0.1;

/// Maximum number of retained absorption records.
pub const HISTORY_LIMIT: usize = 100;

/// Number of trailing records averaged into the growth rate.
pub const GROWTH_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy)]
struct WordWeight {
    weight: f64,
    /// Absorption order, used to break weight ties
    order: u64,
}

pub struct Lexicon {
    tokenizer: Arc<dyn Tokenizer>,
    field: Arc<dyn CooccurrenceStore>,
    config: LexiconConfig,
    /// Absorbed words and their weights; the key set is the absorbed-word set
    word_weights: HashMap<String, WordWeight>,
    absorbed_trigrams: HashSet<Trigram>,
    history: VecDeque<AbsorptionRecord>,
    corpus_words: HashSet<String>,
    next_order: u64,
    metrics: Arc<LexiconMetrics>,
}

impl Lexicon {
    /// Create a lexicon that injects into `field`.
    ///
    /// The store is shared, not owned: the generation path keeps reading
    /// from its own handle.
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        field: Arc<dyn CooccurrenceStore>,
        config: LexiconConfig,
    ) -> Result<Self, CoreError> {
        config.validate().map_err(LexiconError::Config)?;

        let corpus_words = build_corpus_words(tokenizer.as_ref());
        debug!(
            corpus_words = corpus_words.len(),
            decay_rate = config.decay_rate,
            min_word_length = config.min_word_length,
            "Lexicon created"
        );

        Ok(Self {
            tokenizer,
            field,
            config,
            word_weights: HashMap::new(),
            absorbed_trigrams: HashSet::new(),
            history: VecDeque::with_capacity(HISTORY_LIMIT),
            corpus_words,
            next_order: 0,
            metrics: Arc::new(LexiconMetrics::new()),
        })
    }

    /// Absorb words and trigrams from `text`.
    ///
    /// Unseen words start at `boost`; seen words gain a fixed
    /// [`REINFORCEMENT`] up to [`MAX_WEIGHT`]. Unseen trigrams are injected
    /// into the field once. The returned record lists only what was new.
    pub fn absorb(&mut self, text: &str, source: &str, boost: f64) -> AbsorptionRecord {
        let boost = self.sanitize_boost(boost);
        let words = extract_words(text, self.config.min_word_length);
        let trigrams = extract_trigrams(text);

        let mut new_words = Vec::new();
        let mut reinforced = 0u64;
        for word in words {
            match self.word_weights.get_mut(&word) {
                Some(entry) => {
                    entry.weight = (entry.weight + REINFORCEMENT).min(MAX_WEIGHT);
                    reinforced += 1;
                }
                None => {
                    let order = self.next_order;
                    self.next_order += 1;
                    self.word_weights.insert(
                        word.clone(),
                        WordWeight {
                            weight: initial_weight(boost),
                            order,
                        },
                    );
                    new_words.push(word);
                }
            }
        }

        let mut new_trigrams = Vec::new();
        for trigram in trigrams {
            if self.absorbed_trigrams.contains(&trigram) {
                continue;
            }
            self.absorbed_trigrams.insert(trigram.clone());
            self.inject_trigram(&trigram, boost);
            new_trigrams.push(trigram);
        }

        LexiconMetrics::add(&self.metrics.absorptions, 1);
        LexiconMetrics::add(&self.metrics.words_absorbed, new_words.len() as u64);
        LexiconMetrics::add(&self.metrics.words_reinforced, reinforced);
        LexiconMetrics::add(&self.metrics.trigrams_absorbed, new_trigrams.len() as u64);

        let record = AbsorptionRecord::new(source, new_words, new_trigrams);
        debug!(
            source = %record.source,
            new_words = record.words.len(),
            new_trigrams = record.trigrams.len(),
            reinforced,
            "Absorbed text"
        );

        self.history.push_back(record.clone());
        while self.history.len() > HISTORY_LIMIT {
            self.history.pop_front();
        }

        record
    }

    /// Inject one trigram into the co-occurrence field.
    ///
    /// Uses the boundary tokens of the three words: two pair increments and
    /// one triple increment, each by `weight` truncated toward zero. If any
    /// word encodes to nothing the whole injection is skipped.
    pub fn inject_trigram(&self, trigram: &Trigram, weight: f64) {
        let [w1, w2, w3] = trigram.words();
        let t1 = self.tokenizer.encode(w1);
        let t2 = self.tokenizer.encode(w2);
        let t3 = self.tokenizer.encode(w3);

        let (Some(&last_w1), Some(&first_w2), Some(&last_w2), Some(&first_w3)) =
            (t1.last(), t2.first(), t2.last(), t3.first())
        else {
            LexiconMetrics::add(&self.metrics.injections_skipped, 1);
            trace!(%trigram, "Injection skipped: unencodable word");
            return;
        };

        let by = injection_magnitude(weight);
        self.field.increment_pair(last_w1, first_w2, by);
        self.field.increment_pair(last_w2, first_w3, by);
        self.field.increment_triple((last_w1, first_w2), last_w2, by);

        LexiconMetrics::add(&self.metrics.injections_applied, 1);
        trace!(%trigram, by, "Injected trigram");
    }

    /// Fade every word weight by the decay rate and forget words that drop
    /// below [`REMOVAL_THRESHOLD`]. Trigrams and field counts are untouched.
    ///
    /// Returns the number of words removed.
    pub fn decay(&mut self) -> usize {
        let rate = self.config.decay_rate;
        let before = self.word_weights.len();

        self.word_weights.retain(|_, entry| {
            entry.weight *= rate;
            entry.weight >= REMOVAL_THRESHOLD
        });

        let removed = before - self.word_weights.len();
        LexiconMetrics::add(&self.metrics.decay_passes, 1);
        LexiconMetrics::add(&self.metrics.words_decayed, removed as u64);
        if removed > 0 {
            debug!(removed, remaining = self.word_weights.len(), "Decayed words");
        }

        removed
    }

    /// Up to `n` words, heaviest first. Equal weights keep absorption order.
    pub fn get_resonant_words(&self, n: usize) -> Vec<String> {
        let mut entries: Vec<(&String, &WordWeight)> = self.word_weights.iter().collect();
        entries.sort_by(|a, b| {
            b.1.weight
                .partial_cmp(&a.1.weight)
                .unwrap_or(Ordering::Equal)
                .then(a.1.order.cmp(&b.1.order))
        });
        entries
            .into_iter()
            .take(n)
            .map(|(word, _)| word.clone())
            .collect()
    }

    pub fn stats(&self) -> LexiconStats {
        let sources: HashSet<&str> = self.history.iter().map(|r| r.source.as_str()).collect();

        let growth_rate = if self.history.len() >= 2 {
            let window = self.history.len().min(GROWTH_WINDOW);
            let total: usize = self
                .history
                .iter()
                .skip(self.history.len() - window)
                .map(AbsorptionRecord::count)
                .sum();
            total as f64 / window as f64
        } else {
            0.0
        };

        LexiconStats {
            total_words: self.word_weights.len(),
            total_trigrams: self.absorbed_trigrams.len(),
            unique_sources: sources.len(),
            recent_absorptions: self.history.len(),
            growth_rate,
        }
    }

    /// Current weight of an absorbed word.
    pub fn weight(&self, word: &str) -> Option<f64> {
        self.word_weights.get(word).map(|e| e.weight)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.word_weights.contains_key(word)
    }

    pub fn contains_trigram(&self, trigram: &Trigram) -> bool {
        self.absorbed_trigrams.contains(trigram)
    }

    /// Absorbed words, in no particular order.
    pub fn absorbed_words(&self) -> impl Iterator<Item = &str> {
        self.word_weights.keys().map(String::as_str)
    }

    pub fn absorbed_trigrams(&self) -> impl Iterator<Item = &Trigram> {
        self.absorbed_trigrams.iter()
    }

    /// Retained records, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &AbsorptionRecord> {
        self.history.iter()
    }

    /// Lowercased decodings of every token id, captured at construction.
    ///
    /// Kept for inspection only; absorption does not consult it.
    pub fn corpus_words(&self) -> &HashSet<String> {
        &self.corpus_words
    }

    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<LexiconMetrics> {
        Arc::clone(&self.metrics)
    }

    fn sanitize_boost(&self, boost: f64) -> f64 {
        if boost.is_finite() {
            boost
        } else {
            warn!(boost, fallback = self.config.default_boost, "Non-finite boost replaced");
            self.config.default_boost
        }
    }
}

fn build_corpus_words(tokenizer: &dyn Tokenizer) -> HashSet<String> {
    (0..tokenizer.vocab_size())
        .map(|id| tokenizer.decode(&[id as TokenId]).to_lowercase())
        .collect()
}

/// First weight of a new word, kept inside (0, MAX_WEIGHT].
fn initial_weight(boost: f64) -> f64 {
    boost.clamp(f64::MIN_POSITIVE, MAX_WEIGHT)
}

/// Integer part of the weight; negative weights contribute nothing.
fn injection_magnitude(weight: f64) -> u64 {
    if weight <= 0.0 {
        0
    } else {
        weight.trunc() as u64
    }
}
