//! Detection of banned words in chat messages, including the disguised ones
//! (`b4d`, `b a d`, homoglyphs, diacritics), with a spelling oracle used to
//! tell the real occurrences apart from innocent words that merely contain
//! a banned one (`assassin`).
mod adjudicator;
mod banned_words;
mod checker;
mod config;
mod error;
mod http;
mod observability;
mod oracle;

pub mod parser;
pub mod substitution;
pub mod text;
pub mod util;

pub use crate::error::*;
pub use banned_words::*;
pub use checker::*;
pub use config::*;
pub use http::HttpClientError;
pub use observability::*;
pub use oracle::{DatamuseConfig, DatamuseOracle, OracleError, SpellingCandidate, SpellingOracle};

#[allow(unused_imports)]
mod prelude {
    pub(crate) use crate::error::prelude::*;
    pub(crate) use crate::http::prelude::*;
    pub(crate) use crate::observability::logging::prelude::*;
    pub(crate) use crate::util::prelude::*;
}
