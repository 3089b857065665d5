//! Decides whether a found [`Context`] is a real banned word occurrence or
//! an innocent word that merely contains the banned one.
use crate::oracle::SpellingOracle;
use crate::parser::Context;
use crate::prelude::*;
use crate::Result;
use futures::future;
use itertools::Itertools;

/// Single-letter words that are legitimate on their own
const ONE_LETTER_WORDS: &[char] = &['a', 'i', 'u', 'o', 'm'];

pub(crate) struct Adjudicator<'a> {
    oracle: &'a dyn SpellingOracle,
    top_suggestions: usize,
}

impl<'a> Adjudicator<'a> {
    pub(crate) fn new(oracle: &'a dyn SpellingOracle, top_suggestions: usize) -> Self {
        Self {
            oracle,
            top_suggestions,
        }
    }

    /// Returns the context back if it has to be flagged, or `None` if it
    /// turned out to be legitimate.
    #[instrument(skip_all, fields(
        banned_word = %context.banned_word,
        converted = %context.converted_context,
    ))]
    pub(crate) async fn check_context(&self, context: Context) -> Result<Option<Context>> {
        let flagged = self.is_flagged(&context).await?;

        debug!(flagged, "Adjudicated the context");

        Ok(flagged.then_some(context))
    }

    async fn is_flagged(&self, context: &Context) -> Result<bool> {
        let converted = context.converted_context.as_str();
        let banned_word = context.banned_word.as_str();

        if is_single_word(converted) {
            return self.check_word(converted, banned_word).await;
        }

        let sub_words = split_sub_words(converted);

        if sub_words.is_empty() {
            return self.check_word(converted, banned_word).await;
        }

        let has_stray_letter = sub_words.iter().any(|sub_word| {
            let mut chars = sub_word.chars();
            matches!(
                (chars.next(), chars.next()),
                (Some(letter), None) if !ONE_LETTER_WORDS.contains(&letter)
            )
        });

        if has_stray_letter {
            trace!(?sub_words, "Context has a stray letter");
            return Ok(true);
        }

        let verdicts = future::try_join_all(
            sub_words
                .iter()
                .map(|sub_word| self.check_word(sub_word, banned_word)),
        )
        .await?;

        if verdicts.into_iter().any(|flagged| flagged) {
            return Ok(true);
        }

        if sub_words.len() == 1 {
            return Ok(false);
        }

        // The banned word may be split into legitimate pieces, e.g. `butt head`
        let joined = sub_words.concat();

        trace!(%joined, "Giving the second chance to the context");

        self.check_word(&joined, banned_word).await
    }

    /// Returns `true` if the candidate has to be flagged as the banned word.
    pub(crate) async fn check_word(&self, candidate: &str, banned_word: &str) -> Result<bool> {
        if candidate == banned_word {
            return Ok(true);
        }

        let (suggestions, duration) = self.oracle.query(candidate).with_duration().await;
        metrics::histogram!("censy_oracle_query_duration_seconds", duration);

        let suggestions = suggestions?;

        trace!(
            candidate,
            duration = tracing_duration(duration),
            suggestions = %suggestions.iter().map(|suggestion| &suggestion.word).join(", "),
            "Oracle responded"
        );

        if suggestions.is_empty() {
            return Ok(true);
        }

        let mut explained = false;

        for suggestion in suggestions.iter().take(self.top_suggestions) {
            if suggestion.word == banned_word {
                return Ok(true);
            }
            if candidate.contains(suggestion.word.as_str()) {
                explained = true;
            }
        }

        Ok(!explained)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '\''
}

fn is_single_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_word_char)
}

fn split_sub_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|sub_word| !sub_word.is_empty())
        .collect()
}
