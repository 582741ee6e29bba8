// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed processed-event set, shared across restarts.

use async_trait::async_trait;
use chrono::Utc;
use courier_core::{CourierError, Fingerprint, FingerprintStore};
use rusqlite::OptionalExtension;

use crate::database::{Database, map_tr_err};

/// [`FingerprintStore`] over the `processed_events` table.
///
/// `insert` is a single `INSERT OR IGNORE`; the affected row count tells
/// whether this caller recorded the fingerprint first.
#[derive(Clone)]
pub struct SqliteFingerprintStore {
    db: Database,
}

impl SqliteFingerprintStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FingerprintStore for SqliteFingerprintStore {
    async fn contains(&self, fingerprint: &Fingerprint) -> Result<bool, CourierError> {
        let fp = fingerprint.as_str().to_string();
        self.db
            .connection()
            .call(move |conn| {
                conn.query_row(
                    "SELECT 1 FROM processed_events WHERE fingerprint = ?1",
                    rusqlite::params![fp],
                    |_| Ok(()),
                )
                .optional()
            })
            .await
            .map(|row| row.is_some())
            .map_err(map_tr_err)
    }

    async fn insert(&self, fingerprint: &Fingerprint) -> Result<bool, CourierError> {
        let fp = fingerprint.as_str().to_string();
        let now = Utc::now().to_rfc3339();
        self.db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO processed_events (fingerprint, seen_at) VALUES (?1, ?2)",
                    rusqlite::params![fp, now],
                )
            })
            .await
            .map(|inserted| inserted == 1)
            .map_err(map_tr_err)
    }
}
