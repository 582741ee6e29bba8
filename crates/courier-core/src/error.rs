// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Courier relay.

use thiserror::Error;

/// The primary error type used across all Courier adapter traits and core operations.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Thread or fingerprint store errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Messaging channel errors (outbound send failure, bad response).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The webhook body was not valid JSON.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The webhook body parsed but is not a recognized messaging event.
    #[error("not a WhatsApp API event")]
    NotAWebhookEvent,

    /// Webhook signature missing or mismatched.
    #[error("signature verification failed: {0}")]
    Signature(String),

    /// The assistant requested a tool that is not registered.
    #[error("unknown tool `{name}`")]
    UnknownTool { name: String },

    /// The assistant sent tool arguments that could not be parsed.
    #[error("invalid arguments for tool `{name}`: {message}")]
    InvalidToolArguments { name: String, message: String },

    /// The run did not reach a decision state within the poll ceiling.
    #[error("run {run_id} still pending after {attempts} polls")]
    RunTimeout { run_id: String, attempts: u32 },

    /// The run ended in a non-completed terminal state.
    #[error("run {run_id} ended with status `{status}`{}", format_reason(.reason))]
    RunFailed {
        run_id: String,
        status: String,
        reason: Option<String>,
    },

    /// The assistant API rejected a request or returned something unparseable.
    #[error("assistant unavailable: {message}")]
    AssistantUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A transient failure (rate limit, 5xx, connection) persisted through all retries.
    #[error("transient error after {attempts} attempts: {message}")]
    Transient { message: String, attempts: u32 },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

fn format_reason(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default()
}

impl CourierError {
    /// Returns true for errors raised while driving a run, which the relay
    /// converts into a fallback reply instead of failing the webhook.
    pub fn is_turn_failure(&self) -> bool {
        matches!(
            self,
            CourierError::UnknownTool { .. }
                | CourierError::InvalidToolArguments { .. }
                | CourierError::RunTimeout { .. }
                | CourierError::RunFailed { .. }
                | CourierError::AssistantUnavailable { .. }
                | CourierError::Transient { .. }
        )
    }
}
