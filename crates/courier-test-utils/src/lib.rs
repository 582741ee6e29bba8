// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for Courier integration tests.
//!
//! - [`ScriptedAssistant`] - assistant API that plays back a fixed run script
//! - [`RecordingChannel`] - channel capturing every outbound message
//! - [`CountingHandler`] - inbound handler counting deliveries

pub mod assistant;
pub mod channel;

pub use assistant::{RunStep, ScriptedAssistant};
pub use channel::{CountingHandler, RecordingChannel};
