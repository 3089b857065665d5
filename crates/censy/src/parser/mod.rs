//! Scanning of the message variants for banned word occurrences.
//!
//! There are two complementary strategies. [`NaiveMessageParser`] finds
//! literal occurrences, and [`ComplexMessageParser`] tolerates extra chars
//! inserted between the letters of a banned word. Both report what they
//! found as [`Context`]s appended to a shared sink. The same occurrence may
//! be reported by both of them, deduplication is up to the caller.
mod complex;
mod context;
mod naive;

pub use complex::ComplexMessageParser;
pub use context::Context;
pub use naive::NaiveMessageParser;

pub(crate) use context::ContextExtractor;
