// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Courier relay.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// External user identifier for a conversation (a WhatsApp `wa_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey(pub String);

impl ConversationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a persistent conversation thread on the assistant API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub String);

impl ThreadId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a single assistant run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl RunId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a message (outbound send receipt or thread message).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Content digest of an inbound event, lowercase hex SHA-256.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Assistant,
    Speech,
}

// --- Assistant run types ---

/// Lifecycle status of an assistant run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    /// Any status string this build does not know about.
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// True while the run is still being worked on and should be polled.
    pub fn is_pending(self) -> bool {
        matches!(self, RunStatus::Queued | RunStatus::InProgress)
    }
}

/// A tool invocation requested by the assistant while a run is in `requires_action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call identifier, echoed back in the matching [`ToolOutput`].
    pub id: String,
    /// Name of the requested tool.
    pub name: String,
    /// JSON-encoded arguments as produced by the model.
    pub arguments: String,
}

/// The result of a tool call, submitted back to resume a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

/// Snapshot of an assistant run.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub id: RunId,
    pub thread_id: ThreadId,
    pub status: RunStatus,
    /// Tool calls awaiting output; non-empty only in `requires_action`.
    pub tool_calls: Vec<ToolCall>,
    /// Error message reported by the API for failed runs.
    pub last_error: Option<String>,
}

/// Parameters for starting a run on a thread.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub assistant_id: String,
    /// Overrides the assistant's configured model.
    pub model: Option<String>,
    /// Overrides the assistant's instructions.
    pub instructions: Option<String>,
    /// Function tool schemas the assistant may call.
    pub tools: Vec<serde_json::Value>,
}

/// Author role of a thread message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message stored on a thread, reduced to its text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    pub id: MessageId,
    pub role: MessageRole,
    pub text: String,
}

// --- Channel types ---

/// A text message received from the messaging platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Platform message id, when present.
    pub message_id: Option<String>,
    /// Sender identifier.
    pub from: ConversationKey,
    /// Sender profile name.
    pub display_name: String,
    /// Message text.
    pub text: String,
}

/// A pre-approved template message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMessage {
    pub name: String,
    pub language_code: String,
    /// Template components (header/body parameters) in platform format.
    pub components: Vec<serde_json::Value>,
}

/// A message to deliver through a channel adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    Text { to: String, body: String },
    Template { to: String, template: TemplateMessage },
}

impl OutboundMessage {
    /// Recipient identifier.
    pub fn recipient(&self) -> &str {
        match self {
            OutboundMessage::Text { to, .. } | OutboundMessage::Template { to, .. } => to,
        }
    }
}
