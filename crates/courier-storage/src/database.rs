// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection setup: pragmas, WAL mode and migrations.

use std::path::Path;
use std::sync::Arc;

use courier_core::CourierError;
use tokio_rusqlite::Connection;
use tracing::debug;

/// Shared handle to the relay database.
///
/// Cloning is cheap; every clone talks to the same background thread, which
/// serializes all statements.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Connection>,
}

impl Database {
    /// Open (creating if needed) the database file at `path` and migrate it.
    pub async fn open(path: &str) -> Result<Self, CourierError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CourierError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| CourierError::Storage {
                source: Box::new(e),
            })?;
        let db = Self::prepare(conn, true).await?;
        debug!(path, "database opened");
        Ok(db)
    }

    /// Fresh private in-memory database.
    pub async fn open_in_memory() -> Result<Self, CourierError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| CourierError::Storage {
                source: Box::new(e),
            })?;
        Self::prepare(conn, false).await
    }

    async fn prepare(conn: Connection, wal: bool) -> Result<Self, CourierError> {
        conn.call(move |conn| {
            if wal {
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                    row.get::<_, String>(0)
                })?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
            }
            conn.busy_timeout(std::time::Duration::from_secs(5))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| Ok::<_, rusqlite::Error>(crate::migrations::run_migrations(conn)))
            .await
            .map_err(map_tr_err)??;

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Flush the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), CourierError> {
        self.conn
            .call(|conn| conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);"))
            .await
            .map_err(map_tr_err)
    }
}

/// Convert a tokio-rusqlite error into `CourierError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> CourierError {
    CourierError::Storage {
        source: Box::new(e),
    }
}
