// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store capabilities for processed-event fingerprints and thread mappings.

use async_trait::async_trait;

use crate::error::CourierError;
use crate::types::{ConversationKey, Fingerprint, ThreadId};

/// Set of fingerprints of events that have already been handled.
///
/// `insert` must be an atomic check-and-insert: when several callers insert
/// the same fingerprint concurrently, exactly one of them sees `true`.
#[async_trait]
pub trait FingerprintStore: Send + Sync {
    /// Returns true if the fingerprint has been recorded.
    async fn contains(&self, fingerprint: &Fingerprint) -> Result<bool, CourierError>;

    /// Records the fingerprint. Returns true if it was not present before.
    async fn insert(&self, fingerprint: &Fingerprint) -> Result<bool, CourierError>;
}

/// Mapping from conversation key to assistant thread id.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Returns the thread stored for `key`, if any.
    async fn get(&self, key: &ConversationKey) -> Result<Option<ThreadId>, CourierError>;

    /// Stores `thread` for `key`, replacing any previous mapping.
    async fn put(&self, key: &ConversationKey, thread: &ThreadId) -> Result<(), CourierError>;

    /// Removes the mapping for `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &ConversationKey) -> Result<(), CourierError>;
}
