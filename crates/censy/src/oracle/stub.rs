use super::{OracleError, SpellingCandidate, SpellingOracle};
use crate::prelude::*;
use crate::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// Deterministic in-memory oracle. Words without configured suggestions
/// are considered spelled correctly, i.e. the word itself is suggested.
#[derive(Default)]
pub(crate) struct StubOracle {
    suggestions: HashMap<String, Vec<String>>,
    failing: bool,
    delay: Option<Duration>,
    word_delays: HashMap<String, Duration>,
    queries: Mutex<Vec<String>>,
}

impl StubOracle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_suggestions(mut self, word: &str, suggestions: &[&str]) -> Self {
        self.suggestions.insert(
            word.to_owned(),
            suggestions.iter().map(|&word| word.to_owned()).collect(),
        );
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Overrides [`Self::with_delay`] for the given word
    pub(crate) fn with_word_delay(mut self, word: &str, delay: Duration) -> Self {
        self.word_delays.insert(word.to_owned(), delay);
        self
    }

    /// All words queried so far, in order of arrival
    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SpellingOracle for StubOracle {
    async fn query(&self, word: &str) -> Result<Vec<SpellingCandidate>> {
        self.queries.lock().push(word.to_owned());

        if let Some(delay) = self.word_delays.get(word).copied().or(self.delay) {
            tokio::time::sleep(delay).await;
        }

        if self.failing {
            return Err(err!(OracleError::Unavailable {
                word: word.to_owned(),
                source: "stub oracle is configured to fail",
            }));
        }

        let suggestions = self
            .suggestions
            .get(word)
            .cloned()
            .unwrap_or_else(|| vec![word.to_owned()]);

        Ok(suggestions
            .into_iter()
            .map(|word| SpellingCandidate { word })
            .collect())
    }
}
