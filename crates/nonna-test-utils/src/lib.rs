//! Testing utilities for the Nonna workspace
//!
//! Shared fixtures, a scripted knowledge source and a recording messenger.

#![allow(missing_docs)]

use async_trait::async_trait;
use nonna_core::{
    BotContext, ChannelAllowList, ChannelId, ContentFilter, KnowledgeLookup, LookupOutcome,
    MessageId, Messenger, MessengerError, NonnaConfig, Orchestrator, QueryEvent, SummaryPayload,
    PASTA_SET,
};
use nonna_fuzzy::FuzzyMatcher;
use nonna_limiter::{Clock, MemoryStore, RateLimiter};
use nonna_names::CanonicalNameSet;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Channel every fixture event is posted in
pub const TEST_CHANNEL: &str = "console";

pub fn pasta_names() -> CanonicalNameSet {
    CanonicalNameSet::new(
        PASTA_SET,
        ["Spaghetti", "Penne", "Rigatoni", "Bucatini", "Busiate", "busiati", "busiati"],
    )
}

pub fn food_terms() -> ContentFilter {
    ContentFilter::new(["Pizza", "Hamburger", "Sushi"])
}

pub fn summary(extract: &str) -> SummaryPayload {
    SummaryPayload {
        extract: Some(extract.to_string()),
        ..SummaryPayload::default()
    }
}

pub fn event(identity: &str, text: &str) -> QueryEvent {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let id = NEXT.fetch_add(1, Ordering::Relaxed);
    QueryEvent::new(format!("msg-{id}"), identity, TEST_CHANNEL, text)
}

/// Knowledge source answering from a fixed table
///
/// Unknown terms are `NotFound`. Every call is recorded.
#[derive(Debug, Default)]
pub struct StubLookup {
    answers: HashMap<String, LookupOutcome>,
    calls: Mutex<Vec<String>>,
}

impl StubLookup {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, term: &str, outcome: LookupOutcome) -> Self {
        self.answers.insert(term.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl KnowledgeLookup for StubLookup {
    async fn lookup(&self, term: &str) -> LookupOutcome {
        self.calls.lock().push(term.to_string());
        self.answers
            .get(term)
            .cloned()
            .unwrap_or(LookupOutcome::NotFound)
    }
}

/// One outbound platform action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { channel: ChannelId, text: String },
    Reaction { message: MessageId, emoji: String },
    Reply { message: MessageId, text: String },
}

/// Messenger that records instead of sending
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    fail: bool,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messenger whose every action fails
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } | Sent::Reply { text, .. } => Some(text.clone()),
                Sent::Reaction { .. } => None,
            })
            .collect()
    }

    fn push(&self, sent: Sent) -> Result<(), MessengerError> {
        if self.fail {
            return Err(MessengerError::DeliveryFailed("recording messenger set to fail".to_string()));
        }
        self.sent.lock().push(sent);
        Ok(())
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, channel: &ChannelId, text: &str) -> Result<(), MessengerError> {
        self.push(Sent::Text {
            channel: channel.clone(),
            text: text.to_string(),
        })
    }

    async fn react(&self, message: &MessageId, emoji: &str) -> Result<(), MessengerError> {
        self.push(Sent::Reaction {
            message: message.clone(),
            emoji: emoji.to_string(),
        })
    }

    async fn reply(&self, message: &MessageId, text: &str) -> Result<(), MessengerError> {
        self.push(Sent::Reply {
            message: message.clone(),
            text: text.to_string(),
        })
    }
}

pub fn setup_test_context(
    config: NonnaConfig,
    lookup: Arc<dyn KnowledgeLookup>,
    clock: Arc<dyn Clock>,
) -> BotContext {
    let matcher = FuzzyMatcher::builder().add(&pasta_names()).unwrap().build();
    let limiter = RateLimiter::with_clock(config.rate_limit, Arc::new(MemoryStore::new()), clock);
    BotContext::from_parts(
        config,
        matcher,
        limiter,
        food_terms(),
        lookup,
        ChannelAllowList::from_ids([TEST_CHANNEL]),
    )
    .unwrap()
}

pub fn setup_test_orchestrator(lookup: Arc<dyn KnowledgeLookup>) -> Orchestrator {
    let clock = Arc::new(nonna_limiter::SystemClock);
    Orchestrator::new(Arc::new(setup_test_context(
        NonnaConfig::new(),
        lookup,
        clock,
    )))
}
