use super::{SnapshotFormat, Style};
use expect_test::Expect;
use serde::Serialize;

struct Imp;

impl<T: Serialize + ?Sized> SnapshotFormat<T> for Imp {
    fn render(style: Style, actual: &T) -> String {
        let rendered = match style {
            Style::Terse => serde_json::to_string(actual),
            Style::Verbose => serde_json::to_string_pretty(actual),
        };
        rendered.unwrap_or_else(|err| panic!("BUG: value is not serializable to JSON: {err}"))
    }
}

/// Asserts that the JSON representation of `actual` matches the snapshot.
#[track_caller]
pub fn assert_eq<T: Serialize + ?Sized>(actual: &T, expected: &Expect) {
    Imp::assert_eq(actual, expected)
}
