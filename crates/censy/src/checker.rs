use crate::adjudicator::Adjudicator;
use crate::oracle::{OracleError, SpellingOracle};
use crate::parser::{ComplexMessageParser, Context, NaiveMessageParser};
use crate::prelude::*;
use crate::substitution::CharacterSubstitutor;
use crate::{text, CheckerConfig, Result};
use futures::future;
use itertools::Itertools;
use serde::Serialize;
use std::iter;
use std::sync::Arc;
use std::time::Instant;

/// Entry point of the detection pipeline.
pub struct MessageChecker {
    oracle: Arc<dyn SpellingOracle>,
    config: CheckerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageCheckerResult {
    is_flagged: bool,
    contexts: Vec<Context>,
}

impl MessageCheckerResult {
    pub fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Flagged contexts in the order they were found in the message
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn into_contexts(self) -> Vec<Context> {
        self.contexts
    }
}

impl MessageChecker {
    pub fn new(oracle: Arc<dyn SpellingOracle>, config: CheckerConfig) -> Self {
        Self { oracle, config }
    }

    /// Looks for the banned words in the message including their disguised
    /// forms. Any oracle failure fails the whole check, no partial results
    /// are returned.
    ///
    /// Banned words must be lowercase. Empty ones are ignored.
    #[instrument(skip_all, fields(
        content_len = content.len(),
        banned_words = banned_words.len(),
    ))]
    pub async fn check_message<W: AsRef<str> + Sync>(
        &self,
        content: &str,
        banned_words: &[W],
    ) -> Result<MessageCheckerResult> {
        metrics::increment_counter!("censy_messages_checked_total");

        let start = Instant::now();
        let check = self.check_message_imp(content, banned_words);

        let result = match self.config.timeout() {
            Some(timeout) => tokio::time::timeout(timeout, check)
                .await
                .map_err(|_| err!(OracleError::Timeout { timeout }))??,
            None => check.await?,
        };

        if result.is_flagged {
            metrics::increment_counter!("censy_messages_flagged_total");
        }

        debug!(
            flagged = result.is_flagged,
            contexts = result.contexts.len(),
            duration = tracing_duration(start.elapsed()),
            "Checked the message"
        );

        Ok(result)
    }

    async fn check_message_imp<W: AsRef<str> + Sync>(
        &self,
        content: &str,
        banned_words: &[W],
    ) -> Result<MessageCheckerResult> {
        let banned_words: Vec<_> = banned_words
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|word| !word.is_empty())
            .collect();

        if content.trim().is_empty() || banned_words.is_empty() {
            return Ok(MessageCheckerResult::default());
        }

        let contexts = self.collect_contexts(content, &banned_words)?;

        debug!(candidates = contexts.len(), "Collected candidate contexts");

        let adjudicator = Adjudicator::new(&*self.oracle, self.config.top_suggestions);

        let verdicts = future::try_join_all(
            contexts
                .into_iter()
                .map(|context| adjudicator.check_context(context)),
        )
        .await?;

        let contexts: Vec<_> = verdicts.into_iter().flatten().collect();

        Ok(MessageCheckerResult {
            is_flagged: !contexts.is_empty(),
            contexts,
        })
    }

    /// Runs both parsers over every variant of the message. The result is
    /// deduplicated and ordered by discovery.
    fn collect_contexts(&self, content: &str, banned_words: &[&str]) -> Result<Vec<Context>> {
        // Keeps the casing for display, but has the same chars as the variants
        let original = text::strip_diacritics(content);
        let normalized = text::fold_case(&original);

        let substituted = CharacterSubstitutor.convert_text(&normalized);

        trace!(%normalized, ?substituted, "Prepared the message variants");

        let complex = ComplexMessageParser::process_banned_words(banned_words, &self.config)?;
        let mut naive = NaiveMessageParser::new(&self.config);

        let mut contexts = vec![];

        for variant in iter::once(&normalized).chain(&substituted) {
            naive
                .check_for_banned_words(variant, banned_words)
                .get_context_of_banned_word(&original, variant, &mut contexts);

            complex.get_context_of_banned_word(&original, variant, &mut contexts);
        }

        Ok(contexts.into_iter().unique().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::stub::StubOracle;
    use crate::{BannedWordSet, ErrorKind};
    use assert_matches::assert_matches;
    use expect_test::{expect, Expect};
    use std::time::Duration;

    fn checker(oracle: &Arc<StubOracle>) -> MessageChecker {
        MessageChecker::new(oracle.clone(), CheckerConfig::default())
    }

    #[track_caller]
    fn assert_contexts(result: &MessageCheckerResult, expected: Expect) {
        let actual = result
            .contexts()
            .iter()
            .map(|context| {
                format!(
                    "{}: {} | {}",
                    context.banned_word, context.original_context, context.converted_context
                )
            })
            .collect::<Vec<_>>();

        test_bat::debug::assert_eq(&actual, &expected);
    }

    #[test_log::test(tokio::test)]
    async fn exact_match() {
        let oracle = Arc::new(StubOracle::new());
        let result = checker(&oracle).check_message("bad", &["bad"]).await.unwrap();

        assert!(result.is_flagged());
        assert_contexts(&result, expect![[r#"["bad: bad | bad"]"#]]);
        assert!(oracle.queries().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn innocent_word_containing_banned_one() {
        let oracle = Arc::new(StubOracle::new().with_suggestions("assassin", &["assassin"]));
        let result = checker(&oracle)
            .check_message("he is an assassin", &["ass"])
            .await
            .unwrap();

        assert!(!result.is_flagged());
        assert_contexts(&result, expect!["[]"]);
        expect![[r#"["assassin"]"#]].assert_eq(&format!("{:?}", oracle.queries()));
    }

    #[test_log::test(tokio::test)]
    async fn character_substitution() {
        let oracle = Arc::new(StubOracle::new());
        let result = checker(&oracle).check_message("so B4D", &["bad"]).await.unwrap();

        assert!(result.is_flagged());
        assert_contexts(&result, expect![[r#"["bad: B4D | bad"]"#]]);
    }

    #[test_log::test(tokio::test)]
    async fn homoglyphs_and_diacritics() {
        let oracle = Arc::new(StubOracle::new());

        // Cyrillic `а`
        let result = checker(&oracle).check_message("bаd", &["bad"]).await.unwrap();
        assert_contexts(&result, expect![[r#"["bad: bаd | bad"]"#]]);

        let result = checker(&oracle).check_message("Bád!", &["bad"]).await.unwrap();
        assert_contexts(&result, expect![[r#"["bad: Bad! | bad!"]"#]]);
        assert!(result.is_flagged());
    }

    #[test_log::test(tokio::test)]
    async fn word_break_evasion() {
        let oracle = Arc::new(StubOracle::new());

        let result = checker(&oracle).check_message("you are b a d", &["bad"]).await.unwrap();
        assert_contexts(&result, expect![[r#"["bad: b a d | b a d"]"#]]);

        let result = checker(&oracle).check_message("b.a.d", &["bad"]).await.unwrap();
        assert_contexts(&result, expect![[r#"["bad: b.a.d | b.a.d"]"#]]);
    }

    #[test_log::test(tokio::test)]
    async fn second_chance() {
        let oracle = Arc::new(StubOracle::new());
        let result = checker(&oracle)
            .check_message("what a butt head", &["butthead"])
            .await
            .unwrap();

        assert_contexts(&result, expect![[r#"["butthead: butt head | butt head"]"#]]);
        expect![[r#"["butt", "head"]"#]].assert_eq(&format!("{:?}", oracle.queries()));
    }

    #[test_log::test(tokio::test)]
    async fn punctuation_around_innocent_words() {
        let oracle = Arc::new(StubOracle::new());
        let result = checker(&oracle)
            .check_message("pass the glass, please", &["ass"])
            .await
            .unwrap();

        assert!(!result.is_flagged());
    }

    #[test_log::test(tokio::test)]
    async fn discovery_order_is_preserved() {
        let oracle = Arc::new(StubOracle::new());
        let result = checker(&oracle)
            .check_message("ugly and bad", &["bad", "ugly"])
            .await
            .unwrap();

        assert_contexts(
            &result,
            expect![[r#"["bad: bad | bad", "ugly: ugly | ugly"]"#]],
        );
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn discovery_order_does_not_depend_on_oracle_latency() {
        // The first found context is adjudicated last
        let oracle = Arc::new(
            StubOracle::new()
                .with_suggestions("badd", &[])
                .with_suggestions("uglyy", &[])
                .with_word_delay("badd", Duration::from_secs(10))
                .with_word_delay("uglyy", Duration::from_secs(1)),
        );

        let result = checker(&oracle)
            .check_message("badd and uglyy", &["bad", "ugly"])
            .await
            .unwrap();

        assert_contexts(
            &result,
            expect![[r#"["bad: badd | badd", "ugly: uglyy | uglyy"]"#]],
        );
    }

    #[test_log::test(tokio::test)]
    async fn banned_word_with_diacritics() {
        let oracle = Arc::new(StubOracle::new());
        let banned_words = BannedWordSet::from_words(["Maricón"]).unwrap();

        let result = checker(&oracle)
            .check_message("eres un maricón", banned_words.as_slice())
            .await
            .unwrap();

        assert!(result.is_flagged());
        assert_contexts(&result, expect![[r#"["maricon: maricon | maricon"]"#]]);
    }

    #[test_log::test(tokio::test)]
    async fn nothing_to_check() {
        let oracle = Arc::new(StubOracle::new());
        let checker = checker(&oracle);

        let cases: [(&str, &[&str]); 4] = [
            ("bad", &[]),
            ("bad", &[""]),
            ("", &["bad"]),
            ("  \n ", &["bad"]),
        ];

        for (content, banned_words) in cases {
            let result = checker.check_message(content, banned_words).await.unwrap();
            assert_eq!(result, MessageCheckerResult::default());
        }

        assert!(oracle.queries().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn oracle_failure_fails_the_check() {
        let oracle = Arc::new(StubOracle::new().failing());
        let err = checker(&oracle)
            .check_message("he is an assassin", &["ass"])
            .await
            .unwrap_err();

        assert_matches!(
            err.kind(),
            ErrorKind::Oracle {
                source: OracleError::Unavailable { .. }
            }
        );
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn timeout() {
        let oracle = Arc::new(StubOracle::new().with_delay(Duration::from_secs(10)));
        let config = CheckerConfig::default().with_timeout(Some(Duration::from_secs(1)));

        let err = MessageChecker::new(oracle, config)
            .check_message("he is an assassin", &["ass"])
            .await
            .unwrap_err();

        assert_matches!(
            err.kind(),
            ErrorKind::Oracle {
                source: OracleError::Timeout { .. }
            }
        );
    }

    #[test_log::test(tokio::test)]
    async fn idempotence() {
        let oracle = Arc::new(StubOracle::new());
        let checker = checker(&oracle);
        let content = "What a b4d-ass, pass the glass";
        let banned_words = ["ass", "bad"];

        let first = checker.check_message(content, &banned_words).await.unwrap();
        let second = checker.check_message(content, &banned_words).await.unwrap();

        assert_eq!(first, second);
    }

    #[test_log::test(tokio::test)]
    async fn result_json() {
        let oracle = Arc::new(StubOracle::new());
        let result = checker(&oracle).check_message("b4d", &["bad"]).await.unwrap();

        test_bat::json::assert_eq(
            &result,
            &expect![[r#"
                {
                  "is_flagged": true,
                  "contexts": [
                    {
                      "banned_word": "bad",
                      "original_context": "b4d",
                      "converted_context": "bad"
                    }
                  ]
                }"#]],
        );
    }
}
