//! Generation of de-obfuscated readings of the text.
use itertools::Itertools;

type Table = &'static [(char, char)];

/// Cyrillic and Greek letters that look like Latin ones
const HOMOGLYPHS: Table = &[
    ('а', 'a'),
    ('в', 'b'),
    ('с', 'c'),
    ('ԁ', 'd'),
    ('е', 'e'),
    ('һ', 'h'),
    ('і', 'i'),
    ('ј', 'j'),
    ('к', 'k'),
    ('м', 'm'),
    ('п', 'n'),
    ('о', 'o'),
    ('р', 'p'),
    ('ԛ', 'q'),
    ('г', 'r'),
    ('ѕ', 's'),
    ('т', 't'),
    ('у', 'y'),
    ('ԝ', 'w'),
    ('х', 'x'),
    ('α', 'a'),
    ('β', 'b'),
    ('ε', 'e'),
    ('η', 'n'),
    ('ι', 'i'),
    ('κ', 'k'),
    ('ν', 'v'),
    ('ο', 'o'),
    ('ρ', 'p'),
    ('τ', 't'),
    ('υ', 'u'),
    ('χ', 'x'),
    ('γ', 'y'),
];

const PRIMARY_LEET: Table = &[
    ('4', 'a'),
    ('@', 'a'),
    ('8', 'b'),
    ('(', 'c'),
    ('3', 'e'),
    ('6', 'g'),
    ('9', 'g'),
    ('#', 'h'),
    ('1', 'i'),
    ('!', 'i'),
    ('0', 'o'),
    ('5', 's'),
    ('$', 's'),
    ('7', 't'),
    ('+', 't'),
    ('2', 'z'),
];

/// Readings of the ambiguous symbols that [`PRIMARY_LEET`] maps differently
const ALTERNATE_LEET: Table = &[
    ('4', 'a'),
    ('@', 'a'),
    ('3', 'e'),
    ('1', 'l'),
    ('|', 'l'),
    ('!', 'l'),
    ('0', 'o'),
    ('5', 's'),
    ('$', 's'),
    ('7', 't'),
];

/// Tables combined into every variant, in order of priority
const VARIANTS: &[&[Table]] = &[
    &[HOMOGLYPHS],
    &[HOMOGLYPHS, PRIMARY_LEET],
    &[HOMOGLYPHS, ALTERNATE_LEET],
];

/// Replaces visually or phonetically similar chars (`4` → `a`, Cyrillic `о`
/// → Latin `o`, ...) to reveal disguised spellings.
///
/// Every substitution maps one char to exactly one char, so the variants
/// have the same char positions as the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharacterSubstitutor;

impl CharacterSubstitutor {
    /// Returns the distinct variants of the lowercase `text` that differ from
    /// it. The result is empty if there is nothing to substitute.
    pub fn convert_text(&self, text: &str) -> Vec<String> {
        VARIANTS
            .iter()
            .map(|tables| substitute(text, tables))
            .filter(|variant| variant != text)
            .unique()
            .collect()
    }
}

fn substitute(text: &str, tables: &[Table]) -> String {
    text.chars()
        .map(|c| {
            tables
                .iter()
                .find_map(|table| table.iter().find(|(from, _)| *from == c))
                .map_or(c, |&(_, to)| to)
        })
        .collect()
}
