//! Lexicon statistics snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Computed view of lexicon growth. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexiconStats {
    /// Words currently tracked
    pub total_words: usize,
    /// Trigrams absorbed over the instance lifetime
    pub total_trigrams: usize,
    /// Distinct source tags across the retained history
    pub unique_sources: usize,
    /// Number of retained history records
    pub recent_absorptions: usize,
    /// Mean new-pattern count over the last (up to) 10 records
    pub growth_rate: f64,
}

impl fmt::Display for LexiconStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LexiconStats(words={}, trigrams={}, growth={:.2}/turn)",
            self.total_words, self.total_trigrams, self.growth_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let stats = LexiconStats {
            total_words: 12,
            total_trigrams: 9,
            unique_sources: 1,
            recent_absorptions: 3,
            growth_rate: 7.0,
        };
        assert_eq!(
            stats.to_string(),
            "LexiconStats(words=12, trigrams=9, growth=7.00/turn)"
        );
    }

    #[test]
    fn test_default_is_zeroed() {
        let stats = LexiconStats::default();
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.growth_rate, 0.0);
    }
}
