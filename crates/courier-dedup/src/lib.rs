// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Duplicate suppression for inbound webhook events.
//!
//! An event is identified by the SHA-256 of its canonical JSON form. The
//! [`FingerprintGuard`] performs a single atomic check-and-insert against an
//! injected [`FingerprintStore`](courier_core::FingerprintStore), so each
//! distinct event is processed at most once.

pub mod fingerprint;
pub mod guard;
pub mod memory;

pub use fingerprint::{canonical_json, fingerprint};
pub use guard::FingerprintGuard;
pub use memory::MemoryFingerprintStore;
