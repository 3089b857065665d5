use super::{OracleError, SpellingCandidate, SpellingOracle};
use crate::prelude::*;
use crate::{http, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct DatamuseConfig {
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Max number of suggestions requested per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> Url {
    Url::parse("https://api.datamuse.com").unwrap_or_else(|err| {
        panic!("BUG: the default Datamuse URL is invalid: {err}");
    })
}

fn default_max_results() -> usize {
    10
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for DatamuseConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_results: default_max_results(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// [`SpellingOracle`] backed by the spelling suggestions of the Datamuse API.
///
/// Docs: <https://www.datamuse.com/api/>
pub struct DatamuseOracle {
    http: http::Client,
    words_url: Url,
    max_results: usize,
}

impl DatamuseOracle {
    pub fn new(config: DatamuseConfig) -> Result<Self> {
        let http = http::create_client(Duration::from_secs(config.request_timeout_secs))?;

        let mut words_url = config.base_url;
        words_url
            .path_segments_mut()
            .ok()
            .fatal_ctx(|| "Datamuse base URL can't be a base")?
            .pop_if_empty()
            .push("words");

        Ok(Self {
            http,
            words_url,
            max_results: config.max_results,
        })
    }

    fn query_url(&self, word: &str) -> Url {
        let mut url = self.words_url.clone();
        url.query_pairs_mut()
            .append_pair("sp", word)
            .append_pair("max", &self.max_results.to_string());
        url
    }
}

#[async_trait]
impl SpellingOracle for DatamuseOracle {
    #[instrument(skip(self))]
    async fn query(&self, word: &str) -> Result<Vec<SpellingCandidate>> {
        let candidates: Vec<SpellingCandidate> = self
            .http
            .get(self.query_url(word))
            .read_json()
            .await
            .map_err(err_ctx!(OracleError::Unavailable {
                word: word.to_owned()
            }))?;

        trace!(?candidates, "Datamuse responded");

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn oracle(base_url: &str) -> DatamuseOracle {
        DatamuseOracle::new(DatamuseConfig {
            base_url: base_url.parse().unwrap(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn query_url() {
        let actual = oracle("https://api.datamuse.com").query_url("b4d");
        expect!["https://api.datamuse.com/words?sp=b4d&max=10"].assert_eq(actual.as_str());

        let actual = oracle("http://localhost:8080/datamuse/").query_url("what's up");
        expect!["http://localhost:8080/datamuse/words?sp=what%27s+up&max=10"]
            .assert_eq(actual.as_str());
    }

    #[test]
    fn response_shape() {
        let response = r#"[{"word": "bad", "score": 1500}, {"word": "bed", "score": 400}]"#;
        let candidates: Vec<SpellingCandidate> = serde_json::from_str(response).unwrap();

        test_bat::debug::assert_eq(
            &candidates,
            &expect![[r#"
                [
                    SpellingCandidate {
                        word: "bad",
                    },
                    SpellingCandidate {
                        word: "bed",
                    },
                ]"#]],
        );
    }

    #[test]
    fn cannot_be_a_base_url_is_rejected() {
        let result = DatamuseOracle::new(DatamuseConfig {
            base_url: "mailto:someone@example.com".parse().unwrap(),
            ..Default::default()
        });

        assert!(result.is_err());
    }
}
