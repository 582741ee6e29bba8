// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local fingerprint set.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use courier_core::{CourierError, Fingerprint, FingerprintStore};

#[derive(Default)]
struct Inner {
    seen: HashSet<Fingerprint>,
    /// Insertion order, only maintained when bounded.
    order: VecDeque<Fingerprint>,
}

/// In-memory [`FingerprintStore`].
///
/// Unbounded by default. With a capacity, the oldest fingerprint is evicted
/// once the set is full, so a very old event could be processed again.
#[derive(Default)]
pub struct MemoryFingerprintStore {
    inner: Mutex<Inner>,
    capacity: Option<usize>,
}

impl MemoryFingerprintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding at most `capacity` fingerprints.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            inner: Mutex::default(),
            capacity: Some(capacity.max(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.seen.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, CourierError> {
        self.inner
            .lock()
            .map_err(|_| CourierError::Internal("fingerprint set lock poisoned".into()))
    }
}

#[async_trait]
impl FingerprintStore for MemoryFingerprintStore {
    async fn contains(&self, fingerprint: &Fingerprint) -> Result<bool, CourierError> {
        Ok(self.lock()?.seen.contains(fingerprint))
    }

    async fn insert(&self, fingerprint: &Fingerprint) -> Result<bool, CourierError> {
        let mut inner = self.lock()?;
        if !inner.seen.insert(fingerprint.clone()) {
            return Ok(false);
        }
        if let Some(capacity) = self.capacity {
            inner.order.push_back(fingerprint.clone());
            while inner.order.len() > capacity {
                if let Some(evicted) = inner.order.pop_front() {
                    inner.seen.remove(&evicted);
                }
            }
        }
        Ok(true)
    }
}
