//! Chat platform seam
//!
//! The orchestrator only talks to the platform through [`Messenger`]; which
//! channels it listens to is decided by a [`ChannelAllowList`] built once the
//! session is ready.

use crate::error::MessengerError;
use crate::types::{ChannelId, MessageId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outbound messaging
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Post text to a channel
    async fn send_text(&self, channel: &ChannelId, text: &str) -> Result<(), MessengerError>;

    /// Add a reaction to a message
    async fn react(&self, message: &MessageId, emoji: &str) -> Result<(), MessengerError>;

    /// Reply to a message
    async fn reply(&self, message: &MessageId, text: &str) -> Result<(), MessengerError>;
}

/// Channel descriptor reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Channel id
    pub id: ChannelId,
    /// Whether the channel carries text messages
    pub text_based: bool,
    /// Whether the bot may post there
    pub sendable: bool,
}

impl ChannelInfo {
    /// Text channel the bot can post in
    #[must_use]
    pub fn text(id: impl Into<String>) -> Self {
        Self {
            id: ChannelId::new(id),
            text_based: true,
            sendable: true,
        }
    }
}

/// Channels the bot answers in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelAllowList {
    ids: HashSet<ChannelId>,
}

impl ChannelAllowList {
    /// Keep text channels the bot can post in
    #[must_use]
    pub fn from_channels<'a, I>(channels: I) -> Self
    where
        I: IntoIterator<Item = &'a ChannelInfo>,
    {
        let ids: HashSet<_> = channels
            .into_iter()
            .filter(|c| c.text_based && c.sendable)
            .map(|c| c.id.clone())
            .collect();
        tracing::info!(channels = ids.len(), "channel allow-list built");
        Self { ids }
    }

    /// Allow exactly these ids
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(|id| ChannelId::new(id)).collect(),
        }
    }

    /// Whether the channel is allowed
    #[inline]
    #[must_use]
    pub fn contains(&self, channel: &ChannelId) -> bool {
        self.ids.contains(channel)
    }

    /// Number of allowed channels
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no channel is allowed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
