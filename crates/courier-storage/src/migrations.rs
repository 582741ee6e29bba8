// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations (refinery).

use courier_core::CourierError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply pending migrations. Applied versions are tracked in
/// `refinery_schema_history`.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), CourierError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| CourierError::Storage {
            source: Box::new(e),
        })?;
    Ok(())
}
