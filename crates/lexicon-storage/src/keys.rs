//! Key encoding for the storage layer.
//!
//! Word keys:    `word:{word}`
//! Trigram keys: `tri:{w1}\x1f{w2}\x1f{w3}`
//!
//! Absorbed words are runs of word characters, so the unit separator
//! never appears inside a component.

use lexicon_types::Trigram;

const WORD_PREFIX: &str = "word:";
const TRIGRAM_PREFIX: &str = "tri:";
const SEP: char = '\u{1f}';

/// Key for an absorbed word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordKey {
    pub word: String,
}

impl WordKey {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("{}{}", WORD_PREFIX, self.word).into_bytes()
    }
}

/// Key for an absorbed trigram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrigramKey {
    pub trigram: Trigram,
}

impl TrigramKey {
    pub fn new(trigram: Trigram) -> Self {
        Self { trigram }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let [a, b, c] = self.trigram.words();
        format!("{}{}{}{}{}{}", TRIGRAM_PREFIX, a, SEP, b, SEP, c).into_bytes()
    }
}
