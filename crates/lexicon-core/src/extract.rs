//! Word and trigram extraction.
//!
//! Both extractors lowercase the text and split it into maximal runs of
//! word characters (alphanumeric or underscore). Word extraction drops runs
//! shorter than the minimum length; trigram extraction does not, so a
//! trigram may contain words that would never be absorbed on their own.

use lexicon_types::Trigram;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercased word runs, unfiltered, in text order.
fn word_runs(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|run| !run.is_empty())
        .map(str::to_string)
        .collect()
}

/// Words of at least `min_word_length` characters, in text order.
///
/// Duplicates are kept: `"love, love"` yields two entries.
pub fn extract_words(text: &str, min_word_length: usize) -> Vec<String> {
    word_runs(text)
        .into_iter()
        .filter(|w| w.chars().count() >= min_word_length)
        .collect()
}

/// Every consecutive window of three words, stride 1.
///
/// `n` words yield `max(0, n - 2)` trigrams.
pub fn extract_trigrams(text: &str) -> Vec<Trigram> {
    word_runs(text)
        .windows(3)
        .map(|w| Trigram::new(w[0].as_str(), w[1].as_str(), w[2].as_str()))
        .collect()
}
