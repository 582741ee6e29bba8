// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistants v2 and audio API request/response types.

use courier_core::types::{
    MessageId, MessageRole, Run, RunId, RunStatus, ThreadId, ThreadMessage, ToolCall, ToolOutput,
};
use serde::{Deserialize, Serialize};

// --- Requests ---

#[derive(Debug, Serialize)]
pub struct CreateMessageRequest<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateRunRequest<'a> {
    pub assistant_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<&'a str>,
    #[serde(skip_serializing_if = "no_tools")]
    pub tools: &'a [serde_json::Value],
}

fn no_tools(tools: &&[serde_json::Value]) -> bool {
    tools.is_empty()
}

#[derive(Debug, Serialize)]
pub struct SubmitToolOutputsRequest<'a> {
    pub tool_outputs: &'a [ToolOutput],
}

#[derive(Debug, Serialize)]
pub struct SpeechRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
    pub voice: &'a str,
    pub speed: f32,
    pub response_format: &'static str,
}

// --- Responses ---

#[derive(Debug, Deserialize)]
pub struct ThreadObject {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct RunObject {
    pub id: String,
    pub thread_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

#[derive(Debug, Deserialize)]
pub struct RequiredAction {
    pub submit_tool_outputs: Option<SubmitToolOutputs>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitToolOutputs {
    #[serde(default)]
    pub tool_calls: Vec<ApiToolCall>,
}

#[derive(Debug, Deserialize)]
pub struct ApiToolCall {
    pub id: String,
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub struct RunError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl From<RunObject> for Run {
    fn from(run: RunObject) -> Self {
        let tool_calls = run
            .required_action
            .and_then(|a| a.submit_tool_outputs)
            .map(|s| s.tool_calls)
            .unwrap_or_default()
            .into_iter()
            .map(|c| ToolCall {
                id: c.id,
                name: c.function.name,
                arguments: c.function.arguments,
            })
            .collect();
        let last_error = run.last_error.and_then(|e| match (e.code, e.message) {
            (Some(code), Some(message)) => Some(format!("{code}: {message}")),
            (code, message) => message.or(code),
        });

        Run {
            id: RunId(run.id),
            thread_id: ThreadId(run.thread_id),
            status: run.status,
            tool_calls,
            last_error,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageList {
    pub data: Vec<MessageObject>,
}

#[derive(Debug, Deserialize)]
pub struct MessageObject {
    pub id: String,
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

/// One content part of a thread message. Only text is relayed.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct TextContent {
    pub value: String,
}

impl From<MessageObject> for ThreadMessage {
    fn from(message: MessageObject) -> Self {
        let text = message
            .content
            .into_iter()
            .filter_map(|part| match part {
                MessageContent::Text { text } => Some(text.value),
                MessageContent::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        ThreadMessage {
            id: MessageId(message.id),
            role: message.role,
            text,
        }
    }
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}
