//! Query resolution
//!
//! Each message runs through a fixed sequence of checks; the first one that
//! decides ends the query:
//!
//! ```text
//! gate -> pattern -> shortcut -> fuzzy -> rate limit -> lookup -> filter
//! ```
//!
//! Every failure is folded into a [`ResolutionOutcome`], so one bad query
//! never affects another.

use crate::context::BotContext;
use crate::error::MessengerError;
use crate::lookup::LookupOutcome;
use crate::platform::Messenger;
use crate::replies;
use crate::types::{QueryEvent, QueryId, ResolutionOutcome, SkipReason};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::Instrument;

static QUERY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\(([^\]]+)\)\)").expect("query pattern is valid"));

/// Extract the normalized `((term))` from message text
///
/// The captured text is case folded and trimmed. The capture is greedy, so
/// several `((..))` groups in one message form a single term.
#[must_use]
pub fn extract_query(text: &str) -> Option<String> {
    QUERY_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase().trim().to_string())
}

/// Resolves and answers queries
#[derive(Debug, Clone)]
pub struct Orchestrator {
    context: Arc<BotContext>,
}

impl Orchestrator {
    /// Create orchestrator over a shared context
    #[must_use]
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// Get context
    #[inline]
    #[must_use]
    pub fn context(&self) -> &BotContext {
        &self.context
    }

    /// Why the event is ignored before any parsing, if it is
    #[must_use]
    pub fn gate(&self, event: &QueryEvent) -> Option<SkipReason> {
        if event.is_automated_author {
            return Some(SkipReason::AutomatedAuthor);
        }
        if !self.context.allow_list.contains(&event.channel_id) {
            return Some(SkipReason::ChannelNotAllowed);
        }
        None
    }

    /// Decide the outcome of an event without delivering anything
    pub async fn resolve(&self, event: &QueryEvent) -> ResolutionOutcome {
        if let Some(reason) = self.gate(event) {
            return ResolutionOutcome::Skipped(reason);
        }
        self.resolve_text(&event.identity, &event.text).await
    }

    /// Decide the outcome of message text sent by `identity`
    pub async fn resolve_text(&self, identity: &str, text: &str) -> ResolutionOutcome {
        let Some(query) = extract_query(text) else {
            return ResolutionOutcome::Skipped(SkipReason::NoPattern);
        };
        tracing::info!(%query, "query received");

        if let Some(shortcut) = replies::find_shortcut(&query) {
            tracing::info!(phrase = shortcut.phrase, "shortcut matched");
            return ResolutionOutcome::Shortcut(shortcut);
        }

        let ctx = &self.context;
        match ctx
            .matcher
            .suggestions(&query, &ctx.config.fuzzy.default_sets, &ctx.policy())
        {
            Ok(per_set) => {
                if let Some((set, list)) = per_set.into_iter().find(|(_, s)| !s.is_empty()) {
                    tracing::info!(%set, suggestion = %list, "suggesting close names");
                    return ResolutionOutcome::Suggestion(list);
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "fuzzy check failed");
                return ResolutionOutcome::LookupFailed;
            }
        }

        match ctx.limiter.admit(identity).await {
            Ok(true) => {}
            Ok(false) => {
                return ResolutionOutcome::RateLimited {
                    identity: identity.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "rate limit store failed");
                return ResolutionOutcome::LookupFailed;
            }
        }

        let payload = match ctx.lookup.lookup(&query).await {
            LookupOutcome::Found(payload) => payload,
            LookupOutcome::NotFound => return ResolutionOutcome::LookupNotFound,
            LookupOutcome::Failed(reason) => {
                tracing::error!(%reason, "lookup failed");
                return ResolutionOutcome::LookupFailed;
            }
        };

        let answer = payload.compose();
        if ctx.filter.is_rejected(&answer) {
            return ResolutionOutcome::ContentRejected;
        }
        ResolutionOutcome::Answer(answer)
    }

    /// Resolve an event and deliver the outcome
    ///
    /// # Errors
    /// Returns `MessengerError` if the platform rejects an outbound action.
    /// The outcome has still been decided and counted by then.
    pub async fn handle(
        &self,
        event: &QueryEvent,
        messenger: &dyn Messenger,
    ) -> Result<ResolutionOutcome, MessengerError> {
        let span = tracing::info_span!(
            "query",
            query_id = %QueryId::new(),
            identity = %event.identity,
            channel = %event.channel_id,
        );

        async {
            let outcome = match self.gate(event) {
                Some(reason) => ResolutionOutcome::Skipped(reason),
                None => {
                    let ack = &self.context.config.acknowledge;
                    if ack.includes(&event.identity) {
                        messenger.react(&event.message_id, &ack.emoji).await?;
                    }
                    self.resolve_text(&event.identity, &event.text).await
                }
            };

            metrics::counter!("nonna_outcomes_total", "outcome" => outcome.label()).increment(1);
            tracing::info!(outcome = outcome.label(), "query resolved");

            deliver(event, &outcome, messenger).await?;
            Ok::<_, MessengerError>(outcome)
        }
        .instrument(span)
        .await
    }
}

async fn deliver(
    event: &QueryEvent,
    outcome: &ResolutionOutcome,
    messenger: &dyn Messenger,
) -> Result<(), MessengerError> {
    match outcome {
        ResolutionOutcome::Skipped(_) => Ok(()),
        ResolutionOutcome::Shortcut(shortcut) => {
            messenger.react(&event.message_id, shortcut.emoji).await?;
            messenger
                .send_text(&event.channel_id, shortcut.media_url)
                .await
        }
        ResolutionOutcome::RateLimited { identity } => {
            messenger
                .reply(&event.message_id, &replies::rate_limited(identity))
                .await
        }
        other => match other.reply_text() {
            Some(text) => messenger.send_text(&event.channel_id, &text).await,
            None => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NonnaConfig, PASTA_SET};
    use crate::filter::ContentFilter;
    use crate::lookup::{MockKnowledgeLookup, SummaryPayload};
    use crate::platform::ChannelAllowList;
    use nonna_fuzzy::FuzzyMatcher;
    use nonna_limiter::RateLimiter;
    use nonna_names::CanonicalNameSet;

    fn orchestrator(lookup: MockKnowledgeLookup) -> Orchestrator {
        let config = NonnaConfig::new();
        let matcher = FuzzyMatcher::builder()
            .add(&CanonicalNameSet::new(PASTA_SET, ["Spaghetti", "Penne"]))
            .unwrap()
            .build();
        let context = BotContext::from_parts(
            config.clone(),
            matcher,
            RateLimiter::in_memory(config.rate_limit),
            ContentFilter::new(["pizza"]),
            Arc::new(lookup),
            ChannelAllowList::from_ids(["console"]),
        )
        .unwrap();
        Orchestrator::new(Arc::new(context))
    }

    fn found(extract: &str) -> LookupOutcome {
        LookupOutcome::Found(SummaryPayload {
            extract: Some(extract.to_string()),
            ..SummaryPayload::default()
        })
    }

    #[test]
    fn extract_query_folds_and_trims() {
        assert_eq!(extract_query("hey ((  Penne ))!").as_deref(), Some("penne"));
        assert_eq!(extract_query("no pattern here"), None);
        assert_eq!(extract_query("(( ))").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn no_pattern_is_skipped() {
        let orch = orchestrator(MockKnowledgeLookup::new());
        assert_eq!(
            orch.resolve_text("alice", "just chatting").await,
            ResolutionOutcome::Skipped(SkipReason::NoPattern)
        );
    }

    #[tokio::test]
    async fn exact_member_goes_to_lookup() {
        let mut lookup = MockKnowledgeLookup::new();
        lookup
            .expect_lookup()
            .withf(|term: &str| term == "spaghetti")
            .times(1)
            .returning(|_| found("Long thin pasta."));

        let orch = orchestrator(lookup);
        assert_eq!(
            orch.resolve_text("alice", "((spaghetti))").await,
            ResolutionOutcome::Answer("Long thin pasta.".to_string())
        );
    }

    #[tokio::test]
    async fn close_name_is_suggested_without_lookup() {
        let mut lookup = MockKnowledgeLookup::new();
        lookup.expect_lookup().never();

        let orch = orchestrator(lookup);
        assert_eq!(
            orch.resolve_text("alice", "((spagetti))").await,
            ResolutionOutcome::Suggestion("Spaghetti".to_string())
        );
    }

    #[tokio::test]
    async fn shortcut_wins_before_fuzzy() {
        let mut lookup = MockKnowledgeLookup::new();
        lookup.expect_lookup().never();

        let orch = orchestrator(lookup);
        let outcome = orch.resolve_text("alice", "((Taylor Ham))").await;
        assert!(matches!(outcome, ResolutionOutcome::Shortcut(s) if s.emoji == "🤌"));
    }

    #[tokio::test]
    async fn sixth_request_is_rate_limited() {
        let mut lookup = MockKnowledgeLookup::new();
        lookup
            .expect_lookup()
            .times(5)
            .returning(|_| LookupOutcome::NotFound);

        let orch = orchestrator(lookup);
        for _ in 0..5 {
            assert_eq!(
                orch.resolve_text("alice", "((rigatoni))").await,
                ResolutionOutcome::LookupNotFound
            );
        }
        assert_eq!(
            orch.resolve_text("alice", "((rigatoni))").await,
            ResolutionOutcome::RateLimited {
                identity: "alice".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failed_lookup_and_filtered_answer() {
        let mut lookup = MockKnowledgeLookup::new();
        lookup
            .expect_lookup()
            .withf(|term: &str| term == "ziti")
            .returning(|_| LookupOutcome::Failed("status 500".to_string()));
        lookup
            .expect_lookup()
            .withf(|term: &str| term == "calzone")
            .returning(|_| found("A folded pizza."));

        let orch = orchestrator(lookup);
        assert_eq!(
            orch.resolve_text("alice", "((ziti))").await,
            ResolutionOutcome::LookupFailed
        );
        assert_eq!(
            orch.resolve_text("alice", "((calzone))").await,
            ResolutionOutcome::ContentRejected
        );
    }

    #[tokio::test]
    async fn gate_skips_bots_and_foreign_channels() {
        let orch = orchestrator(MockKnowledgeLookup::new());

        let bot = QueryEvent::new("m1", "robot", "console", "((penne))").automated();
        assert_eq!(
            orch.resolve(&bot).await,
            ResolutionOutcome::Skipped(SkipReason::AutomatedAuthor)
        );

        let elsewhere = QueryEvent::new("m2", "alice", "voice", "((penne))");
        assert_eq!(
            orch.resolve(&elsewhere).await,
            ResolutionOutcome::Skipped(SkipReason::ChannelNotAllowed)
        );
    }
}
