//! Capability traits for the engine's collaborators.
//!
//! The engine never reaches into a tokenizer's or store's internals. It
//! encodes words through [`Tokenizer`] and writes counts through the narrow
//! increment interface of [`CooccurrenceStore`], which is shared with (and
//! read by) the generation path.

/// Token identifier produced by a [`Tokenizer`].
pub type TokenId = u32;

/// Word <-> token id encoding.
pub trait Tokenizer: Send + Sync {
    /// Encode text into an ordered token sequence. Empty means unencodable.
    fn encode(&self, text: &str) -> Vec<TokenId>;

    /// Decode tokens back into text.
    fn decode(&self, ids: &[TokenId]) -> String;

    /// Number of distinct token ids.
    fn vocab_size(&self) -> usize;
}

/// Mutable adjacency statistics.
///
/// Implementations must auto-vivify missing keys. Increments are additive;
/// the engine never asks a store to decrement.
pub trait CooccurrenceStore: Send + Sync {
    /// Count `next` following `prev`.
    fn increment_pair(&self, prev: TokenId, next: TokenId, by: u64);

    /// Count `next` following the two-token `context`.
    fn increment_triple(&self, context: (TokenId, TokenId), next: TokenId, by: u64);
}
