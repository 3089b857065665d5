use crate::prelude::*;
use crate::{text, Result};
use lazy_regex::regex_is_match;
use serde::Serialize;
use std::fmt;

/// Limit of the text length for the banned word
pub(crate) const MAX_WORD_LENGTH: usize = 60;

/// Trimmed word made of letters, digits, `_`, `-` and `'` in the same
/// canonical form as the messages it's looked for in (see [`text::normalize`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BannedWord(String);

impl BannedWord {
    pub fn new(word: &str) -> Result<Self> {
        let word = text::normalize(word.trim());

        if word.chars().count() > MAX_WORD_LENGTH {
            return Err(err!(BannedWordError::TooLong { word }));
        }

        if !regex_is_match!(r"^[\w\-']+$", &word) {
            return Err(err!(BannedWordError::Malformed { word }));
        }

        Ok(Self(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BannedWord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BannedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BannedWordError {
    #[error("The banned word is longer than {MAX_WORD_LENGTH} characters: {word}")]
    TooLong { word: String },

    #[error(
        "The banned word may contain only letters, digits, underscores, \
        hyphens and apostrophes: {word}"
    )]
    Malformed { word: String },
}

/// Ordered collection of distinct banned words.
/// Use [`BannedWordSet::as_slice`] to pass the words to the checker.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BannedWordSet {
    words: Vec<BannedWord>,
}

#[derive(Debug, Default, Serialize)]
pub struct AddWordsReport {
    pub added: Vec<BannedWord>,
    pub already_present: Vec<BannedWord>,
}

#[derive(Debug, Default, Serialize)]
pub struct RemoveWordsReport {
    pub removed: Vec<BannedWord>,
    pub not_found: Vec<BannedWord>,
}

impl BannedWordSet {
    pub fn from_words<S: AsRef<str>>(raw_words: impl IntoIterator<Item = S>) -> Result<Self> {
        let mut set = Self::default();
        set.add_words(raw_words)?;
        Ok(set)
    }

    /// Nothing is added if any of the words is invalid.
    pub fn add_words<S: AsRef<str>>(
        &mut self,
        raw_words: impl IntoIterator<Item = S>,
    ) -> Result<AddWordsReport> {
        let words = parse_words(raw_words)?;
        let mut report = AddWordsReport::default();

        for word in words {
            if self.contains(&word) {
                report.already_present.push(word);
            } else {
                self.words.push(word.clone());
                report.added.push(word);
            }
        }

        debug!(?report, "Added banned words");

        Ok(report)
    }

    /// Nothing is removed if any of the words is invalid.
    pub fn remove_words<S: AsRef<str>>(
        &mut self,
        raw_words: impl IntoIterator<Item = S>,
    ) -> Result<RemoveWordsReport> {
        let words = parse_words(raw_words)?;
        let mut report = RemoveWordsReport::default();

        for word in words {
            match self.words.iter().position(|present| *present == word) {
                Some(index) => report.removed.push(self.words.remove(index)),
                None => report.not_found.push(word),
            }
        }

        debug!(?report, "Removed banned words");

        Ok(report)
    }

    pub fn contains(&self, word: &BannedWord) -> bool {
        self.words.contains(word)
    }

    pub fn as_slice(&self) -> &[BannedWord] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BannedWord> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> IntoIterator for &'a BannedWordSet {
    type Item = &'a BannedWord;
    type IntoIter = std::slice::Iter<'a, BannedWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn parse_words<S: AsRef<str>>(raw_words: impl IntoIterator<Item = S>) -> Result<Vec<BannedWord>> {
    raw_words
        .into_iter()
        .map(|word| BannedWord::new(word.as_ref()))
        .collect()
}
