use serde::Serialize;
use std::ops::Range;

/// A bounded window of text around a banned word occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Context {
    /// The banned word that was found
    pub banned_word: String,

    /// Window cut out of the message as it was written (only with the
    /// diacritics removed), suitable for displaying to humans
    pub original_context: String,

    /// The same window cut out of the variant where the banned word
    /// was found. This is what the adjudication is based on.
    pub converted_context: String,
}

/// Cuts [`Context`]s out of the pair of the original and the converted text.
pub(crate) struct ContextExtractor {
    original: Vec<char>,
    converted: Vec<char>,

    /// Byte offset of every char of the converted text
    offsets: Vec<usize>,

    radius: usize,
}

impl ContextExtractor {
    pub(crate) fn new(original: &str, converted: &str, radius: usize) -> Self {
        let (offsets, converted) = converted.char_indices().unzip();

        Self {
            original: original.chars().collect(),
            converted,
            offsets,
            radius,
        }
    }

    /// `span` is a byte range of the match in the converted text.
    ///
    /// The window is widened from the match to both sides up to the nearest
    /// whitespace, but by no more than `radius` chars on each side.
    pub(crate) fn extract(&self, banned_word: &str, span: Range<usize>) -> Context {
        let start = self.char_index(span.start);
        let end = self.char_index(span.end);

        let min_start = start.saturating_sub(self.radius);
        let mut start = start;
        while start > min_start && !self.converted[start - 1].is_whitespace() {
            start -= 1;
        }

        let max_end = end.saturating_add(self.radius).min(self.converted.len());
        let mut end = end;
        while end < max_end && !self.converted[end].is_whitespace() {
            end += 1;
        }

        let original_end = end.min(self.original.len());
        let original_start = start.min(original_end);

        Context {
            banned_word: banned_word.to_owned(),
            original_context: self.original[original_start..original_end]
                .iter()
                .collect(),
            converted_context: self.converted[start..end].iter().collect(),
        }
    }

    fn char_index(&self, byte_offset: usize) -> usize {
        self.offsets.partition_point(|&offset| offset < byte_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{expect, Expect};

    #[track_caller]
    fn assert_extract(
        (original, converted): (&str, &str),
        radius: usize,
        needle: &str,
        expected: Expect,
    ) {
        let start = converted
            .find(needle)
            .unwrap_or_else(|| panic!("`{needle}` not found in `{converted}`"));

        let context = ContextExtractor::new(original, converted, radius)
            .extract(needle, start..start + needle.len());

        expected.assert_eq(&format!(
            "{}|{}",
            context.original_context, context.converted_context
        ));
    }

    #[test]
    fn widens_to_word_boundaries() {
        let text = "he is an assassin";
        assert_extract((text, text), 32, "ssa", expect!["assassin|assassin"]);
        assert_extract((text, text), 32, "he", expect!["he|he"]);
        assert_extract((text, text), 32, "s an a", expect!["is an assassin|is an assassin"]);
    }

    #[test]
    fn radius_bounds_the_window() {
        let text = "xxxxxxbadxxxxxx";
        assert_extract((text, text), 2, "bad", expect!["xxbadxx|xxbadxx"]);
        assert_extract((text, text), 0, "bad", expect!["bad|bad"]);
    }

    #[test]
    fn original_is_cut_at_the_same_chars() {
        // Cyrillic `а` takes two bytes, while the Latin one takes one
        assert_extract(
            ("Oh, b4d аpple!", "oh, bad apple!"),
            32,
            "apple",
            expect!["аpple!|apple!"],
        );
        assert_extract(
            ("Oh, b4d аpple!", "oh, bad apple!"),
            32,
            "ba",
            expect!["b4d|bad"],
        );
    }
}
