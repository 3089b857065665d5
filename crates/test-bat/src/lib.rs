//! Snapshot assertions shared by the tests of the workspace crates.
//!
//! Snapshots are rendered tersely on a single line while they fit on a
//! screen, and pretty-printed otherwise, so that `expect![]` literals stay
//! readable both for tiny values and for big nested structures.
pub mod debug;
pub mod json;

use expect_test::Expect;

/// Approximate number of characters that can fit on a single screen
const COMMON_SCREEN_CHARS_WIDTH: usize = 60;

#[derive(Clone, Copy)]
enum Style {
    Terse,
    Verbose,
}

trait SnapshotFormat<T: ?Sized> {
    fn render(style: Style, actual: &T) -> String;

    fn make_snapshot(actual: &T) -> String {
        let terse = Self::render(Style::Terse, actual);

        let fits = terse
            .lines()
            .map(|line| line.chars().count())
            .max()
            .map_or(true, |width| width < COMMON_SCREEN_CHARS_WIDTH);

        if fits {
            return terse;
        }

        Self::render(Style::Verbose, actual)
    }

    #[track_caller]
    fn assert_eq(actual: &T, expected: &Expect) {
        expected.assert_eq(&Self::make_snapshot(actual));
    }
}

fn make_result_snapshot<F, T, E>(actual: &Result<T, E>) -> String
where
    F: SnapshotFormat<T>,
    E: std::error::Error,
{
    match actual {
        Ok(ok) => F::make_snapshot(ok),
        Err(err) => format!("Err: {err}"),
    }
}
