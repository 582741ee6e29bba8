// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for messaging platform integrations.

use async_trait::async_trait;

use crate::error::CourierError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{InboundMessage, MessageId, OutboundMessage};

/// Adapter for delivering messages to a messaging platform.
///
/// Inbound traffic arrives by webhook, so channels only send.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Sends a message through the channel.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, CourierError>;
}

/// Consumer of inbound messages that passed webhook intake.
#[async_trait]
pub trait InboundHandler: Send + Sync + 'static {
    /// Processes one inbound message to completion.
    async fn handle(&self, msg: InboundMessage) -> Result<(), CourierError>;
}
