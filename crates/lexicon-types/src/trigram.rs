//! Trigram type.
//!
//! A trigram is three consecutive lowercase words taken from a text sample.
//! Identity is the exact ordered 3-tuple.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three consecutive words, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Trigram(pub String, pub String, pub String);

impl Trigram {
    pub fn new(first: impl Into<String>, second: impl Into<String>, third: impl Into<String>) -> Self {
        Self(first.into(), second.into(), third.into())
    }

    /// Words as an array of borrowed strings.
    pub fn words(&self) -> [&str; 3] {
        [&self.0, &self.1, &self.2]
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.0, self.1, self.2)
    }
}

impl<A, B, C> From<(A, B, C)> for Trigram
where
    A: Into<String>,
    B: Into<String>,
    C: Into<String>,
{
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::new(a, b, c)
    }
}
