// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence for conversation thread mappings and processed-event
//! fingerprints.
//!
//! SQLite access goes through a single `tokio-rusqlite` background thread;
//! the schema is embedded and migrated on open.

pub mod database;
pub mod fingerprints;
pub mod memory;
pub mod migrations;
pub mod threads;

pub use database::Database;
pub use fingerprints::SqliteFingerprintStore;
pub use memory::MemoryThreadStore;
pub use threads::SqliteThreadStore;
