// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI adapters for the Courier relay.
//!
//! [`OpenAiAssistant`] implements [`AssistantAdapter`] over the Assistants v2
//! API (threads, messages, runs, tool outputs). [`speech::OpenAiSpeech`]
//! implements text-to-speech over the audio API.

pub mod client;
pub mod speech;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use courier_config::CourierConfig;
use courier_core::error::CourierError;
use courier_core::traits::{AssistantAdapter, PluginAdapter};
use courier_core::types::{
    AdapterType, HealthStatus, Run, RunId, RunRequest, ThreadId, ThreadMessage, ToolOutput,
};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{
    CreateMessageRequest, CreateRunRequest, MessageList, RunObject, SubmitToolOutputsRequest,
    ThreadObject,
};

pub use speech::OpenAiSpeech;

/// Messages fetched per listing; the newest assistant reply is always among them.
const MESSAGE_PAGE_SIZE: u32 = 20;

/// Hosted-assistant adapter backed by the OpenAI Assistants API.
pub struct OpenAiAssistant {
    client: OpenAiClient,
}

impl OpenAiAssistant {
    /// Creates the adapter from configuration.
    ///
    /// The API key comes from `openai.api_key`, which the config loader
    /// fills from `OPENAI_API_KEY` when unset.
    pub fn new(config: &CourierConfig) -> Result<Self, CourierError> {
        let client = client_from_config(config)?;
        info!(base_url = client.base_url(), "OpenAI assistant adapter initialized");
        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }
}

/// Builds the shared HTTP client from the `[openai]` section.
pub fn client_from_config(config: &CourierConfig) -> Result<OpenAiClient, CourierError> {
    let api_key = config
        .openai
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            CourierError::Config(
                "OpenAI API key not found: set openai.api_key or OPENAI_API_KEY".into(),
            )
        })?;

    Ok(
        OpenAiClient::new(api_key, Duration::from_secs(config.openai.request_timeout_secs))?
            .with_base_url(config.openai.base_url.clone())
            .with_retry_policy(
                config.openai.max_retries,
                Duration::from_millis(config.openai.retry_backoff_ms),
            ),
    )
}

#[async_trait]
impl PluginAdapter for OpenAiAssistant {
    fn name(&self) -> &str {
        "openai-assistants"
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
impl AssistantAdapter for OpenAiAssistant {
    async fn create_thread(&self) -> Result<ThreadId, CourierError> {
        let thread: ThreadObject = self
            .client
            .request(Method::POST, "/threads", Some(&json!({})))
            .await?;
        debug!(thread_id = %thread.id, "thread created");
        Ok(ThreadId(thread.id))
    }

    async fn add_user_message(&self, thread: &ThreadId, text: &str) -> Result<(), CourierError> {
        let body = CreateMessageRequest {
            role: "user",
            content: text,
        };
        let _: serde_json::Value = self
            .client
            .request(
                Method::POST,
                &format!("/threads/{thread}/messages"),
                Some(&body),
            )
            .await?;
        Ok(())
    }

    async fn create_run(
        &self,
        thread: &ThreadId,
        request: &RunRequest,
    ) -> Result<Run, CourierError> {
        let body = CreateRunRequest {
            assistant_id: &request.assistant_id,
            model: request.model.as_deref(),
            instructions: request.instructions.as_deref(),
            tools: &request.tools,
        };
        let run: RunObject = self
            .client
            .request(Method::POST, &format!("/threads/{thread}/runs"), Some(&body))
            .await?;
        debug!(thread_id = %thread, run_id = %run.id, status = %run.status, "run created");
        Ok(run.into())
    }

    async fn retrieve_run(&self, thread: &ThreadId, run: &RunId) -> Result<Run, CourierError> {
        let run: RunObject = self
            .client
            .request::<(), _>(
                Method::GET,
                &format!("/threads/{thread}/runs/{run}"),
                None,
            )
            .await?;
        Ok(run.into())
    }

    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<ThreadMessage>, CourierError> {
        let list: MessageList = self
            .client
            .request::<(), _>(
                Method::GET,
                &format!("/threads/{thread}/messages?order=desc&limit={MESSAGE_PAGE_SIZE}"),
                None,
            )
            .await?;
        Ok(list.data.into_iter().map(ThreadMessage::from).collect())
    }

    async fn submit_tool_outputs(
        &self,
        thread: &ThreadId,
        run: &RunId,
        outputs: &[ToolOutput],
    ) -> Result<Run, CourierError> {
        let body = SubmitToolOutputsRequest {
            tool_outputs: outputs,
        };
        let run: RunObject = self
            .client
            .request(
                Method::POST,
                &format!("/threads/{thread}/runs/{run}/submit_tool_outputs"),
                Some(&body),
            )
            .await?;
        Ok(run.into())
    }
}
