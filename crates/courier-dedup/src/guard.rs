// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! At-most-once gate in front of event processing.

use std::sync::Arc;

use courier_core::{CourierError, FingerprintStore};
use serde_json::Value;
use tracing::debug;

use crate::fingerprint::fingerprint;

/// Decides whether an inbound event has been seen before.
#[derive(Clone)]
pub struct FingerprintGuard {
    store: Arc<dyn FingerprintStore>,
}

impl FingerprintGuard {
    pub fn new(store: Arc<dyn FingerprintStore>) -> Self {
        Self { store }
    }

    /// Returns `false` the first time an event is presented and `true` for
    /// every later event with identical canonical content.
    ///
    /// The check and the record happen in one store operation, so among
    /// concurrent identical calls exactly one returns `false`.
    pub async fn is_duplicate(&self, event: &Value) -> Result<bool, CourierError> {
        let fp = fingerprint(event);
        let first = self.store.insert(&fp).await?;
        if !first {
            debug!(fingerprint = %fp, "duplicate event suppressed");
        }
        Ok(!first)
    }
}
