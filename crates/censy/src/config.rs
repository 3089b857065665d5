use crate::oracle::DatamuseConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub struct Config {
    pub checker: CheckerConfig,
    pub datamuse: DatamuseConfig,
}

impl Config {
    pub fn load_or_panic() -> Config {
        Self {
            checker: from_env_or_panic("CENSY_"),
            datamuse: from_env_or_panic("DATAMUSE_"),
        }
    }
}

/// Tunable heuristics of the detection pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Number of best-ranked oracle suggestions to consult for a candidate word
    #[serde(default = "default_top_suggestions")]
    pub top_suggestions: usize,

    /// Max number of extra characters tolerated between two consecutive
    /// letters of a banned word (e.g. `b.a.d` with the gap of `1`)
    #[serde(default = "default_max_gap")]
    pub max_gap: usize,

    /// Max number of characters the context window may grow by on each side
    /// of the match when looking for the word boundaries
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,

    /// Deadline for the whole check, including all oracle queries.
    /// No deadline if unset.
    #[serde(default)]
    timeout_secs: Option<u64>,
}

fn default_top_suggestions() -> usize {
    3
}

fn default_max_gap() -> usize {
    1
}

fn default_context_radius() -> usize {
    32
}

impl CheckerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The timeout is rounded up to whole seconds, but no less than one.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout_secs = timeout.map(|timeout| {
            let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
            secs.max(1)
        });
        self
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            top_suggestions: default_top_suggestions(),
            max_gap: default_max_gap(),
            context_radius: default_context_radius(),
            timeout_secs: None,
        }
    }
}

pub(crate) fn from_env_or_panic<T: DeserializeOwned>(prefix: &str) -> T {
    envy::prefixed(prefix).from_env().unwrap_or_else(|err| {
        panic!(
            "BUG: Couldn't load config from environment for {}: {:#?}",
            std::any::type_name::<T>(),
            err
        );
    })
}
