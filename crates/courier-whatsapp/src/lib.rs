// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp Cloud API integration for the Courier relay.
//!
//! Covers both directions: classifying inbound webhook payloads (with
//! `X-Hub-Signature-256` verification and the subscription handshake) and
//! sending text and template messages through the Graph API.

pub mod client;
pub mod flights;
pub mod format;
pub mod signature;
pub mod webhook;

pub use client::WhatsAppChannel;
pub use flights::{Flight, find_flight, flight_confirmation, flights};
pub use format::to_whatsapp_text;
pub use signature::{SIGNATURE_HEADER, sign, verify_signature};
pub use webhook::{Subscription, WebhookEvent, classify, verify_subscription};
