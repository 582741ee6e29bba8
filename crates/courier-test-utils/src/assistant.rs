// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant API stub driven by a queue of run states.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use courier_core::CourierError;
use courier_core::traits::{AssistantAdapter, PluginAdapter};
use courier_core::types::{
    AdapterType, HealthStatus, MessageId, MessageRole, Run, RunId, RunRequest, RunStatus,
    ThreadId, ThreadMessage, ToolCall, ToolOutput,
};

/// One observable state of the scripted run.
#[derive(Debug, Clone)]
pub struct RunStep {
    pub status: RunStatus,
    pub tool_calls: Vec<ToolCall>,
    /// Assistant message appended to the thread when this step is served.
    pub reply: Option<String>,
    pub last_error: Option<String>,
}

impl RunStep {
    fn bare(status: RunStatus) -> Self {
        Self {
            status,
            tool_calls: Vec::new(),
            reply: None,
            last_error: None,
        }
    }

    pub fn queued() -> Self {
        Self::bare(RunStatus::Queued)
    }

    pub fn in_progress() -> Self {
        Self::bare(RunStatus::InProgress)
    }

    pub fn completed(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::bare(RunStatus::Completed)
        }
    }

    /// `requires_action` asking for `(call_id, tool_name, arguments)` calls.
    pub fn requires_action(calls: &[(&str, &str, &str)]) -> Self {
        Self {
            tool_calls: calls
                .iter()
                .map(|(id, name, arguments)| ToolCall {
                    id: id.to_string(),
                    name: name.to_string(),
                    arguments: arguments.to_string(),
                })
                .collect(),
            ..Self::bare(RunStatus::RequiresAction)
        }
    }

    pub fn failed(reason: &str) -> Self {
        Self {
            last_error: Some(reason.to_string()),
            ..Self::bare(RunStatus::Failed)
        }
    }

    pub fn with_status(status: RunStatus) -> Self {
        Self::bare(status)
    }
}

#[derive(Default)]
struct Inner {
    steps: VecDeque<RunStep>,
    /// Oldest first.
    messages: HashMap<ThreadId, Vec<ThreadMessage>>,
    run_requests: Vec<RunRequest>,
    submissions: Vec<Vec<ToolOutput>>,
    user_messages: Vec<(ThreadId, String)>,
}

/// Assistant adapter returning scripted run states.
///
/// `create_run`, `retrieve_run` and `submit_tool_outputs` each consume the
/// next [`RunStep`]. The final step is never consumed, so a script ending in
/// `in_progress` keeps the run pending forever.
pub struct ScriptedAssistant {
    inner: Mutex<Inner>,
    threads_created: AtomicUsize,
    polls: AtomicUsize,
}

impl ScriptedAssistant {
    pub fn new(steps: Vec<RunStep>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                steps: steps.into(),
                ..Inner::default()
            }),
            threads_created: AtomicUsize::new(0),
            polls: AtomicUsize::new(0),
        }
    }

    /// Replaces the remaining script, e.g. between two turns.
    pub async fn script(&self, steps: Vec<RunStep>) {
        self.inner.lock().await.steps = steps.into();
    }

    pub fn threads_created(&self) -> usize {
        self.threads_created.load(Ordering::SeqCst)
    }

    /// Number of `retrieve_run` calls.
    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub async fn run_requests(&self) -> Vec<RunRequest> {
        self.inner.lock().await.run_requests.clone()
    }

    /// Every `submit_tool_outputs` batch in call order.
    pub async fn submissions(&self) -> Vec<Vec<ToolOutput>> {
        self.inner.lock().await.submissions.clone()
    }

    pub async fn user_messages(&self) -> Vec<(ThreadId, String)> {
        self.inner.lock().await.user_messages.clone()
    }

    async fn next_run(&self, thread: &ThreadId) -> Run {
        let mut inner = self.inner.lock().await;
        let step = if inner.steps.len() > 1 {
            inner.steps.pop_front()
        } else {
            inner.steps.front().cloned()
        }
        .unwrap_or_else(|| RunStep::completed(""));

        if let Some(reply) = &step.reply {
            inner
                .messages
                .entry(thread.clone())
                .or_default()
                .push(ThreadMessage {
                    id: MessageId(format!("msg_{}", uuid::Uuid::new_v4().simple())),
                    role: MessageRole::Assistant,
                    text: reply.clone(),
                });
        }

        Run {
            id: RunId("run_scripted".to_string()),
            thread_id: thread.clone(),
            status: step.status,
            tool_calls: step.tool_calls,
            last_error: step.last_error,
        }
    }
}

#[async_trait]
impl PluginAdapter for ScriptedAssistant {
    fn name(&self) -> &str {
        "scripted-assistant"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Assistant
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CourierError> {
        Ok(())
    }
}

#[async_trait]
impl AssistantAdapter for ScriptedAssistant {
    async fn create_thread(&self) -> Result<ThreadId, CourierError> {
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ThreadId(format!("thread_{n}")))
    }

    async fn add_user_message(&self, thread: &ThreadId, text: &str) -> Result<(), CourierError> {
        let mut inner = self.inner.lock().await;
        inner.user_messages.push((thread.clone(), text.to_string()));
        inner
            .messages
            .entry(thread.clone())
            .or_default()
            .push(ThreadMessage {
                id: MessageId(format!("msg_{}", uuid::Uuid::new_v4().simple())),
                role: MessageRole::User,
                text: text.to_string(),
            });
        Ok(())
    }

    async fn create_run(
        &self,
        thread: &ThreadId,
        request: &RunRequest,
    ) -> Result<Run, CourierError> {
        self.inner.lock().await.run_requests.push(request.clone());
        Ok(self.next_run(thread).await)
    }

    async fn retrieve_run(&self, thread: &ThreadId, _run: &RunId) -> Result<Run, CourierError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        Ok(self.next_run(thread).await)
    }

    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>, CourierError> {
        let inner = self.inner.lock().await;
        let mut messages = inner.messages.get(thread).cloned().unwrap_or_default();
        messages.reverse();
        Ok(messages)
    }

    async fn submit_tool_outputs(
        &self,
        thread: &ThreadId,
        _run: &RunId,
        outputs: &[ToolOutput],
    ) -> Result<Run, CourierError> {
        self.inner.lock().await.submissions.push(outputs.to_vec());
        Ok(self.next_run(thread).await)
    }
}
