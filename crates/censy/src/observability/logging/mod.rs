mod future_ext;
mod init;

use crate::util::prelude::*;
use std::time::Duration;

pub use init::{init_logging, LoggingTask};

pub(crate) mod prelude {
    pub(crate) use super::future_ext::FutureExt as _;
    pub(crate) use super::{tracing_duration, tracing_err};

    // Not all of them are used, but it's handy to have any logging macro
    // at hand without touching the imports.
    #[allow(unused_imports)]
    pub(crate) use tracing::{
        debug, debug_span, error, error_span, info, info_span, instrument, trace, trace_span, warn,
        warn_span, Instrument as _,
    };
}

/// Renders the error together with the chain of its sources
#[must_use]
pub fn tracing_err<E: std::error::Error + ?Sized>(err: &E) -> impl tracing::Value + '_ {
    tracing::field::display(err.display_chain())
}

pub(crate) fn tracing_duration(duration: Duration) -> impl tracing::Value {
    tracing::field::display(format!("{duration:.2?}"))
}
