//! Character-level tokenizer built from a corpus.
//!
//! Every distinct character of the corpus becomes one token id, assigned in
//! sorted character order. Characters outside the corpus are skipped when
//! encoding, so a word made only of unknown characters is unencodable.

use std::collections::{BTreeSet, HashMap};

use crate::field::{TokenId, Tokenizer};

#[derive(Debug, Clone)]
pub struct CharTokenizer {
    char_to_id: HashMap<char, TokenId>,
    id_to_char: Vec<char>,
}

impl CharTokenizer {
    pub fn from_text(corpus: &str) -> Self {
        let chars: BTreeSet<char> = corpus.chars().collect();
        let id_to_char: Vec<char> = chars.into_iter().collect();
        let char_to_id = id_to_char
            .iter()
            .enumerate()
            .map(|(id, c)| (*c, id as TokenId))
            .collect();
        Self {
            char_to_id,
            id_to_char,
        }
    }

    pub fn token_for(&self, c: char) -> Option<TokenId> {
        self.char_to_id.get(&c).copied()
    }
}

impl Tokenizer for CharTokenizer {
    fn encode(&self, text: &str) -> Vec<TokenId> {
        text.chars().filter_map(|c| self.token_for(c)).collect()
    }

    fn decode(&self, ids: &[TokenId]) -> String {
        ids.iter()
            .filter_map(|id| self.id_to_char.get(*id as usize))
            .collect()
    }

    fn vocab_size(&self) -> usize {
        self.id_to_char.len()
    }
}
