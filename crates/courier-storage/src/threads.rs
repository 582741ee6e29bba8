// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed conversation → thread mapping.

use async_trait::async_trait;
use chrono::Utc;
use courier_core::{ConversationKey, CourierError, ThreadId, ThreadStore};
use rusqlite::OptionalExtension;

use crate::database::{Database, map_tr_err};

/// [`ThreadStore`] over the `conversation_threads` table.
///
/// `conversation_key` is the primary key, so a key maps to at most one
/// thread at any time.
#[derive(Clone)]
pub struct SqliteThreadStore {
    db: Database,
}

impl SqliteThreadStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ThreadStore for SqliteThreadStore {
    async fn get(&self, key: &ConversationKey) -> Result<Option<ThreadId>, CourierError> {
        let key = key.as_str().to_string();
        self.db
            .connection()
            .call(move |conn| {
                conn.query_row(
                    "SELECT thread_id FROM conversation_threads WHERE conversation_key = ?1",
                    rusqlite::params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()
            })
            .await
            .map(|found| found.map(ThreadId))
            .map_err(map_tr_err)
    }

    async fn put(&self, key: &ConversationKey, thread: &ThreadId) -> Result<(), CourierError> {
        let key = key.as_str().to_string();
        let thread = thread.as_str().to_string();
        let now = Utc::now().to_rfc3339();
        self.db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO conversation_threads (conversation_key, thread_id, created_at, updated_at) \
                     VALUES (?1, ?2, ?3, ?3) \
                     ON CONFLICT(conversation_key) DO UPDATE SET \
                     thread_id = excluded.thread_id, updated_at = excluded.updated_at",
                    rusqlite::params![key, thread, now],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn remove(&self, key: &ConversationKey) -> Result<(), CourierError> {
        let key = key.as_str().to_string();
        self.db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "DELETE FROM conversation_threads WHERE conversation_key = ?1",
                    rusqlite::params![key],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}
