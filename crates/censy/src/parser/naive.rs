use super::{Context, ContextExtractor};
use crate::CheckerConfig;
use std::ops::Range;

/// Finds literal occurrences of banned words.
pub struct NaiveMessageParser {
    context_radius: usize,
    occurrences: Vec<Occurrence>,
}

struct Occurrence {
    banned_word: String,

    /// Byte range in the scanned text
    span: Range<usize>,
}

impl NaiveMessageParser {
    pub fn new(config: &CheckerConfig) -> Self {
        Self {
            context_radius: config.context_radius,
            occurrences: vec![],
        }
    }

    /// Records every occurrence of every banned word in the lowercase `text`,
    /// overlapping ones included. Occurrences recorded by the previous call
    /// are discarded.
    pub fn check_for_banned_words<W: AsRef<str>>(
        &mut self,
        text: &str,
        banned_words: &[W],
    ) -> &mut Self {
        self.occurrences.clear();

        for banned_word in banned_words {
            let banned_word = banned_word.as_ref();
            let Some(first_char) = banned_word.chars().next() else {
                continue;
            };

            let mut from = 0;
            while let Some(pos) = text[from..].find(banned_word) {
                let start = from + pos;
                self.occurrences.push(Occurrence {
                    banned_word: banned_word.to_owned(),
                    span: start..start + banned_word.len(),
                });
                from = start + first_char.len_utf8();
            }
        }

        self
    }

    /// Appends the contexts of the recorded occurrences to `sink`.
    /// `converted_text` must be the text passed to [`Self::check_for_banned_words`].
    pub fn get_context_of_banned_word(
        &self,
        original_text: &str,
        converted_text: &str,
        sink: &mut Vec<Context>,
    ) {
        if self.occurrences.is_empty() {
            return;
        }

        let extractor = ContextExtractor::new(original_text, converted_text, self.context_radius);

        sink.extend(self.occurrences.iter().map(|occurrence| {
            extractor.extract(&occurrence.banned_word, occurrence.span.clone())
        }));
    }
}
