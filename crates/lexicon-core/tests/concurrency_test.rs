//! Concurrent absorption against one shared lexicon.
//!
//! Overlapping `absorb` calls on a multi-threaded runtime must inject each
//! unique trigram into the co-occurrence store exactly once, whatever the
//! interleaving.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use pretty_assertions::assert_eq;

use lexicon_core::{
    extract_trigrams, CharTokenizer, CooccurrenceStore, Lexicon, SharedLexicon, TokenId,
};
use lexicon_types::{LexiconConfig, Trigram};

const CORPUS: &str = "abcdefghijklmnopqrstuvwxyz ";

/// Store that only counts calls.
#[derive(Default)]
struct CountingStore {
    pairs: AtomicU64,
    triples: AtomicU64,
    triple_keys: Mutex<Vec<((TokenId, TokenId), TokenId)>>,
}

impl CooccurrenceStore for CountingStore {
    fn increment_pair(&self, _prev: TokenId, _next: TokenId, _by: u64) {
        self.pairs.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_triple(&self, context: (TokenId, TokenId), next: TokenId, _by: u64) {
        self.triples.fetch_add(1, Ordering::SeqCst);
        self.triple_keys.lock().unwrap().push((context, next));
    }
}

fn shared_with(store: Arc<CountingStore>) -> Arc<SharedLexicon> {
    let tokenizer = Arc::new(CharTokenizer::from_text(CORPUS));
    let lexicon = Lexicon::new(tokenizer, store, LexiconConfig::default()).unwrap();
    Arc::new(SharedLexicon::in_memory(lexicon))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_absorbs_inject_each_trigram_once() {
    let store = Arc::new(CountingStore::default());
    let shared = shared_with(Arc::clone(&store));

    let a = "the quick brown fox jumps over the lazy dog";
    let b = "the quick brown fox naps under the lazy dog";

    let mut handles = Vec::new();
    for round in 0..16 {
        let shared = Arc::clone(&shared);
        let text = if round % 2 == 0 { a } else { b };
        handles.push(tokio::spawn(async move {
            shared.absorb(text, "user", 1.0).await.unwrap()
        }));
    }

    let mut reported: Vec<Trigram> = Vec::new();
    for handle in handles {
        reported.extend(handle.await.unwrap().trigrams);
    }

    let unique: HashSet<Trigram> = extract_trigrams(a)
        .into_iter()
        .chain(extract_trigrams(b))
        .collect();

    assert_eq!(store.triples.load(Ordering::SeqCst), unique.len() as u64);
    assert_eq!(store.pairs.load(Ordering::SeqCst), 2 * unique.len() as u64);

    // No trigram is reported as new by two different absorptions
    let reported_set: HashSet<Trigram> = reported.iter().cloned().collect();
    assert_eq!(reported.len(), reported_set.len());
    assert_eq!(reported_set, unique);

    let stats = shared.stats().await;
    assert_eq!(stats.total_trigrams, unique.len());
    assert_eq!(stats.recent_absorptions, 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_disjoint_texts_all_land() {
    let store = Arc::new(CountingStore::default());
    let shared = shared_with(Arc::clone(&store));

    let texts = [
        "fractals of meaning emerge",
        "quantum entanglement and consciousness",
        "haze speaks with resonance",
        "nature of emergent intelligence",
    ];

    let handles = texts.iter().map(|text| {
        let shared = Arc::clone(&shared);
        let text = text.to_string();
        tokio::spawn(async move { shared.absorb(&text, "user", 1.0).await.unwrap() })
    });

    let total_new: usize = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().count())
        .sum();

    let expected_trigrams: usize = texts.iter().map(|t| extract_trigrams(t).len()).sum();
    assert_eq!(store.triples.load(Ordering::SeqCst), expected_trigrams as u64);
    assert_eq!(store.triple_keys.lock().unwrap().len(), expected_trigrams);

    let stats = shared.stats().await;
    assert_eq!(total_new, stats.total_words + stats.total_trigrams);
}
