// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn processing for the Courier relay.
//!
//! A turn takes one inbound WhatsApp text through the hosted assistant and
//! back:
//! - [`ConversationResolver`] maps the sender to an assistant thread
//! - [`RunOrchestrator`] drives the run to completion, answering tool calls
//! - [`Relay`] sends the reply (or the fallback reply) back to the sender

pub mod orchestrator;
pub mod relay;
pub mod resolver;
pub mod shutdown;

pub use orchestrator::{RunOrchestrator, TurnSettings};
pub use relay::{Relay, SpeechOutput};
pub use resolver::ConversationResolver;
