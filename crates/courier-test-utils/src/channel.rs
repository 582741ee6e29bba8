// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel and inbound-handler doubles.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use courier_core::CourierError;
use courier_core::traits::{ChannelAdapter, InboundHandler, PluginAdapter};
use courier_core::types::{AdapterType, HealthStatus, InboundMessage, MessageId, OutboundMessage};

/// Channel that keeps every sent message for assertions.
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<OutboundMessage>>,
    fail: AtomicBool,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `send` fail with a channel error.
    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl PluginAdapter for RecordingChannel {
    fn name(&self) -> &str {
        "recording-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CourierError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for RecordingChannel {
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, CourierError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CourierError::Channel {
                message: "recording channel set to fail".into(),
                source: None,
            });
        }
        self.sent.lock().await.push(msg);
        Ok(MessageId(format!("wamid.{}", uuid::Uuid::new_v4().simple())))
    }
}

/// Inbound handler that counts deliveries.
///
/// An optional delay widens the window in which concurrent duplicates could
/// slip through.
#[derive(Clone, Default)]
pub struct CountingHandler {
    calls: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<InboundMessage>>>,
    delay: Option<Duration>,
}

impl CountingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn received(&self) -> Vec<InboundMessage> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl InboundHandler for CountingHandler {
    async fn handle(&self, msg: InboundMessage) -> Result<(), CourierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.received.lock().await.push(msg);
        Ok(())
    }
}
