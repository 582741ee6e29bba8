// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant adapter trait for hosted conversational-assistant APIs.

use async_trait::async_trait;

use crate::error::CourierError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Run, RunId, RunRequest, ThreadId, ThreadMessage, ToolOutput};

/// Adapter for a hosted assistant that owns conversation state and tool invocation.
///
/// The API keeps threads of messages server-side. A run executes the
/// assistant over a thread and either completes with a new assistant message
/// or pauses in `requires_action` until tool outputs are submitted.
#[async_trait]
pub trait AssistantAdapter: PluginAdapter {
    /// Creates an empty thread.
    async fn create_thread(&self) -> Result<ThreadId, CourierError>;

    /// Appends a user-role text message to a thread.
    async fn add_user_message(&self, thread: &ThreadId, text: &str) -> Result<(), CourierError>;

    /// Starts a run on a thread.
    async fn create_run(&self, thread: &ThreadId, request: &RunRequest)
    -> Result<Run, CourierError>;

    /// Fetches the current state of a run.
    async fn retrieve_run(&self, thread: &ThreadId, run: &RunId) -> Result<Run, CourierError>;

    /// Lists thread messages, newest first.
    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>, CourierError>;

    /// Submits tool outputs to resume a run paused in `requires_action`.
    async fn submit_tool_outputs(
        &self,
        thread: &ThreadId,
        run: &RunId,
        outputs: &[ToolOutput],
    ) -> Result<Run, CourierError>;
}
