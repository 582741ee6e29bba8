// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sender to assistant-thread mapping.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use courier_core::CourierError;
use courier_core::traits::{AssistantAdapter, ThreadStore};
use courier_core::types::{ConversationKey, ThreadId};

/// Resolves the assistant thread for a conversation.
///
/// With `reuse_thread` the stored thread is returned when present. Without
/// it every call discards the stored thread and starts a new one. Either
/// way the mapping is persisted before `resolve` returns, and calls for the
/// same key are serialized.
pub struct ConversationResolver {
    store: Arc<dyn ThreadStore>,
    assistant: Arc<dyn AssistantAdapter>,
    reuse_thread: bool,
    locks: DashMap<ConversationKey, Arc<Mutex<()>>>,
}

impl ConversationResolver {
    pub fn new(
        store: Arc<dyn ThreadStore>,
        assistant: Arc<dyn AssistantAdapter>,
        reuse_thread: bool,
    ) -> Self {
        Self {
            store,
            assistant,
            reuse_thread,
            locks: DashMap::new(),
        }
    }

    pub async fn resolve(
        &self,
        key: &ConversationKey,
        display_name: &str,
    ) -> Result<ThreadId, CourierError> {
        let lock = self.locks.entry(key.clone()).or_default().clone();
        let _guard = lock.lock().await;

        if self.reuse_thread {
            if let Some(thread) = self.store.get(key).await? {
                debug!(conversation = %key, thread_id = %thread, "reusing thread");
                return Ok(thread);
            }
        } else {
            self.store.remove(key).await?;
        }

        let thread = self.assistant.create_thread().await?;
        self.store.put(key, &thread).await?;
        info!(
            conversation = %key,
            thread_id = %thread,
            display_name,
            "created thread"
        );
        Ok(thread)
    }
}
