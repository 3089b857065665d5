use super::{make_result_snapshot, SnapshotFormat, Style};
use expect_test::Expect;
use std::fmt;

struct Imp;

impl<T: fmt::Debug + ?Sized> SnapshotFormat<T> for Imp {
    fn render(style: Style, actual: &T) -> String {
        match style {
            Style::Terse => format!("{actual:?}"),
            Style::Verbose => format!("{actual:#?}"),
        }
    }
}

/// Asserts that the [`fmt::Debug`] representation of `actual` matches the
/// snapshot, pretty-printed when it does not fit on a single screen line.
#[track_caller]
pub fn assert_eq<T: fmt::Debug + ?Sized>(actual: &T, expected: &Expect) {
    Imp::assert_eq(actual, expected)
}

/// Same as [`assert_eq`], but an [`Err`] is rendered as `Err: {error}`
/// using its [`fmt::Display`] impl.
#[track_caller]
pub fn assert_result_eq<T, E>(actual: &Result<T, E>, expected: &Expect)
where
    T: fmt::Debug,
    E: std::error::Error,
{
    expected.assert_eq(&make_result_snapshot::<Imp, T, E>(actual))
}
