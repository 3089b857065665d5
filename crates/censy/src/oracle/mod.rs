//! The source of legitimate spellings that the adjudication relies on.
mod datamuse;

#[cfg(test)]
pub(crate) mod stub;

pub use datamuse::{DatamuseConfig, DatamuseOracle};

use crate::util::DynError;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A legitimate word suggested by a [`SpellingOracle`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingCandidate {
    pub word: String,
}

/// Returns the legitimate words that the given string most likely spells,
/// ranked best-first. The list may be empty if nothing resembles the input.
///
/// Implementations are expected to be stateless from the caller's point of
/// view, the same query may be issued several times and concurrently.
#[async_trait]
pub trait SpellingOracle: Send + Sync {
    async fn query(&self, word: &str) -> Result<Vec<SpellingCandidate>>;
}

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("Spelling oracle is unavailable (word: {word})")]
    Unavailable { word: String, source: Box<DynError> },

    #[error("Spelling oracle didn't respond in {timeout:.2?}")]
    Timeout { timeout: Duration },
}
