// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Courier relay, built on axum.
//!
//! Serves the WhatsApp webhook (subscription handshake and event intake)
//! alongside the shop routes: company info, the latest synthesized audio,
//! the flight catalog and ticket purchase.

pub mod handlers;
pub mod pages;
pub mod server;

pub use handlers::{WebhookOutcome, process_event};
pub use server::{GatewayState, ServerConfig, router, start_server};
