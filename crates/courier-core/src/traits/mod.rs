// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter and store trait definitions.
//!
//! External-service adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod assistant;
pub mod channel;
pub mod speech;
pub mod store;

pub use adapter::PluginAdapter;
pub use assistant::AssistantAdapter;
pub use channel::{ChannelAdapter, InboundHandler};
pub use speech::SpeechAdapter;
pub use store::{FingerprintStore, ThreadStore};
