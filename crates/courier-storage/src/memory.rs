// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use courier_core::{ConversationKey, CourierError, ThreadId, ThreadStore};
use dashmap::DashMap;

/// Process-local [`ThreadStore`]; mappings are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryThreadStore {
    threads: DashMap<ConversationKey, ThreadId>,
}

impl MemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

#[async_trait]
impl ThreadStore for MemoryThreadStore {
    async fn get(&self, key: &ConversationKey) -> Result<Option<ThreadId>, CourierError> {
        Ok(self.threads.get(key).map(|t| t.value().clone()))
    }

    async fn put(&self, key: &ConversationKey, thread: &ThreadId) -> Result<(), CourierError> {
        self.threads.insert(key.clone(), thread.clone());
        Ok(())
    }

    async fn remove(&self, key: &ConversationKey) -> Result<(), CourierError> {
        self.threads.remove(key);
        Ok(())
    }
}
