use super::{Context, ContextExtractor};
use crate::prelude::*;
use crate::{CheckerConfig, Result};
use itertools::Itertools;
use regex::{Regex, RegexBuilder};

/// Finds occurrences of banned words with extra chars inserted between
/// their letters, e.g. `b a d` or `b.a.d`.
pub struct ComplexMessageParser {
    context_radius: usize,
    matchers: Vec<Matcher>,
}

struct Matcher {
    banned_word: String,
    regex: Regex,
}

impl ComplexMessageParser {
    /// Compiles a matcher for every banned word. The matcher accepts the letters
    /// of the word in order with at most [`CheckerConfig::max_gap`] arbitrary
    /// chars between every two consecutive ones.
    pub fn process_banned_words<W: AsRef<str>>(
        banned_words: &[W],
        config: &CheckerConfig,
    ) -> Result<Self> {
        // Lazy quantifier, so that the shortest span at the given position wins
        let gap = match config.max_gap {
            0 => String::new(),
            max_gap => format!(".{{0,{max_gap}}}?"),
        };

        let matchers = banned_words
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|banned_word| !banned_word.is_empty())
            .map(|banned_word| {
                let pattern = banned_word
                    .chars()
                    .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
                    .join(&gap);

                let regex = RegexBuilder::new(&pattern)
                    .dot_matches_new_line(true)
                    .build()
                    .fatal_ctx(|| format!("Failed to compile the matcher for `{banned_word}`"))?;

                Ok(Matcher {
                    banned_word: banned_word.to_owned(),
                    regex,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            context_radius: config.context_radius,
            matchers,
        })
    }

    /// Scans the `converted_text` and appends the contexts of all occurrences
    /// to `sink`, ordered by banned word and then by position.
    pub fn get_context_of_banned_word(
        &self,
        original_text: &str,
        converted_text: &str,
        sink: &mut Vec<Context>,
    ) {
        let extractor = ContextExtractor::new(original_text, converted_text, self.context_radius);

        for matcher in &self.matchers {
            let mut from = 0;

            // Not using `find_iter()`, because it skips overlapping matches
            while let Some(found) = matcher.regex.find_at(converted_text, from) {
                sink.push(extractor.extract(&matcher.banned_word, found.range()));

                let first_char_len = converted_text[found.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);

                from = found.start() + first_char_len;
            }
        }
    }
}
