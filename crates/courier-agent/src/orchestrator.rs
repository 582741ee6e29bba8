// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives one assistant run from user message to final reply.
//!
//! The run moves through the API's own states. `queued` and `in_progress`
//! are polled with a cooperative sleep, `requires_action` is answered with
//! tool outputs, and `completed` yields the newest assistant message. Both
//! polls and tool rounds are capped per turn, so a turn always ends.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use courier_config::CourierConfig;
use courier_core::CourierError;
use courier_core::traits::AssistantAdapter;
use courier_core::types::{
    ConversationKey, MessageRole, Run, RunRequest, RunStatus, ThreadId, ToolOutput,
};
use courier_tools::ToolDispatcher;

use crate::resolver::ConversationResolver;

/// Per-turn run parameters.
#[derive(Debug, Clone)]
pub struct TurnSettings {
    pub assistant_id: String,
    pub model: Option<String>,
    /// `{name}` is replaced with the sender's display name.
    pub instructions: Option<String>,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub max_tool_rounds: u32,
}

impl TurnSettings {
    /// Requires `openai.assistant_id`.
    pub fn from_config(config: &CourierConfig) -> Result<Self, CourierError> {
        let assistant_id = config
            .openai
            .assistant_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                CourierError::Config(
                    "assistant id not found: set openai.assistant_id or OPENAI_ASSISTANT_ID"
                        .into(),
                )
            })?;
        Ok(Self {
            assistant_id: assistant_id.to_string(),
            model: config.openai.model.clone(),
            instructions: config.openai.instructions.clone(),
            poll_interval: Duration::from_millis(config.run.poll_interval_ms),
            max_poll_attempts: config.run.max_poll_attempts,
            max_tool_rounds: config.run.max_tool_rounds,
        })
    }
}

pub struct RunOrchestrator {
    resolver: Arc<ConversationResolver>,
    assistant: Arc<dyn AssistantAdapter>,
    dispatcher: ToolDispatcher,
    settings: TurnSettings,
}

impl RunOrchestrator {
    pub fn new(
        resolver: Arc<ConversationResolver>,
        assistant: Arc<dyn AssistantAdapter>,
        dispatcher: ToolDispatcher,
        settings: TurnSettings,
    ) -> Self {
        Self {
            resolver,
            assistant,
            dispatcher,
            settings,
        }
    }

    /// Sends `user_text` on the sender's thread and returns the assistant's reply.
    pub async fn complete_turn(
        &self,
        key: &ConversationKey,
        user_text: &str,
        display_name: &str,
    ) -> Result<String, CourierError> {
        let thread = self.resolver.resolve(key, display_name).await?;
        self.assistant.add_user_message(&thread, user_text).await?;

        let request = self.run_request(display_name);
        let mut run = self.assistant.create_run(&thread, &request).await?;
        debug!(conversation = %key, thread_id = %thread, run_id = %run.id, status = %run.status, "run created");

        let mut polls = 0u32;
        let mut tool_rounds = 0u32;
        loop {
            match run.status {
                status if status.is_pending() => {
                    if polls >= self.settings.max_poll_attempts {
                        warn!(conversation = %key, thread_id = %thread, run_id = %run.id, polls, "run timed out");
                        return Err(CourierError::RunTimeout {
                            run_id: run.id.0,
                            attempts: polls,
                        });
                    }
                    tokio::time::sleep(self.settings.poll_interval).await;
                    polls += 1;
                    run = self.assistant.retrieve_run(&thread, &run.id).await?;
                }
                RunStatus::RequiresAction => {
                    if tool_rounds >= self.settings.max_tool_rounds {
                        return Err(CourierError::RunFailed {
                            run_id: run.id.0,
                            status: RunStatus::RequiresAction.to_string(),
                            reason: Some(format!(
                                "more than {} tool rounds",
                                self.settings.max_tool_rounds
                            )),
                        });
                    }
                    tool_rounds += 1;
                    let outputs = self.run_tools(&run).await?;
                    run = self
                        .assistant
                        .submit_tool_outputs(&thread, &run.id, &outputs)
                        .await?;
                }
                RunStatus::Completed => {
                    info!(conversation = %key, thread_id = %thread, run_id = %run.id, polls, tool_rounds, "run completed");
                    return self.latest_reply(&thread, &run).await;
                }
                other => {
                    warn!(
                        conversation = %key,
                        thread_id = %thread,
                        run_id = %run.id,
                        status = %other,
                        reason = run.last_error.as_deref().unwrap_or(""),
                        "run ended without a reply"
                    );
                    return Err(CourierError::RunFailed {
                        run_id: run.id.0,
                        status: other.to_string(),
                        reason: run.last_error,
                    });
                }
            }
        }
    }

    fn run_request(&self, display_name: &str) -> RunRequest {
        RunRequest {
            assistant_id: self.settings.assistant_id.clone(),
            model: self.settings.model.clone(),
            instructions: self
                .settings
                .instructions
                .as_ref()
                .map(|text| text.replace("{name}", display_name)),
            tools: self.dispatcher.tool_definitions(),
        }
    }

    /// Runs every requested tool in the order the run lists them.
    ///
    /// Outputs keep that order and each carries its call id, so the API
    /// matches them by id rather than position.
    async fn run_tools(&self, run: &Run) -> Result<Vec<ToolOutput>, CourierError> {
        if run.tool_calls.is_empty() {
            return Err(CourierError::RunFailed {
                run_id: run.id.0.clone(),
                status: run.status.to_string(),
                reason: Some("no tool calls requested".into()),
            });
        }

        let mut outputs = Vec::with_capacity(run.tool_calls.len());
        for call in &run.tool_calls {
            debug!(run_id = %run.id, tool = %call.name, call_id = %call.id, "dispatching tool");
            let output = self.dispatcher.dispatch(&call.name, &call.arguments).await?;
            outputs.push(ToolOutput {
                tool_call_id: call.id.clone(),
                output,
            });
        }
        Ok(outputs)
    }

    /// Newest assistant message added after the turn's user message.
    ///
    /// Messages are listed newest first, so the scan stops at the first user
    /// message; anything older belongs to an earlier turn.
    async fn latest_reply(&self, thread: &ThreadId, run: &Run) -> Result<String, CourierError> {
        self.assistant
            .list_messages(thread)
            .await?
            .into_iter()
            .take_while(|m| m.role != MessageRole::User)
            .find(|m| m.role == MessageRole::Assistant)
            .map(|m| m.text)
            .ok_or_else(|| CourierError::RunFailed {
                run_id: run.id.0.clone(),
                status: run.status.to_string(),
                reason: Some("no assistant message on thread".into()),
            })
    }
}
