// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn boundary: orchestration errors become the fallback reply here.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use courier_core::CourierError;
use courier_core::traits::{ChannelAdapter, InboundHandler, SpeechAdapter};
use courier_core::types::{InboundMessage, OutboundMessage};
use courier_whatsapp::to_whatsapp_text;

use crate::orchestrator::RunOrchestrator;

/// Writes synthesized replies to a file, replacing the previous one.
pub struct SpeechOutput {
    adapter: Arc<dyn SpeechAdapter>,
    path: PathBuf,
}

impl SpeechOutput {
    pub fn new(adapter: Arc<dyn SpeechAdapter>, path: impl Into<PathBuf>) -> Self {
        Self {
            adapter,
            path: path.into(),
        }
    }

    async fn write(&self, text: &str) -> Result<(), CourierError> {
        let audio = self.adapter.synthesize(text).await?;
        tokio::fs::write(&self.path, &audio)
            .await
            .map_err(|e| CourierError::Internal(format!(
                "failed to write speech to {}: {e}",
                self.path.display()
            )))?;
        debug!(path = %self.path.display(), bytes = audio.len(), "speech written");
        Ok(())
    }
}

/// Inbound handler answering each WhatsApp text with the assistant's reply.
pub struct Relay {
    orchestrator: Arc<RunOrchestrator>,
    channel: Arc<dyn ChannelAdapter>,
    fallback_reply: String,
    speech: Option<SpeechOutput>,
}

impl Relay {
    pub fn new(
        orchestrator: Arc<RunOrchestrator>,
        channel: Arc<dyn ChannelAdapter>,
        fallback_reply: String,
    ) -> Self {
        Self {
            orchestrator,
            channel,
            fallback_reply,
            speech: None,
        }
    }

    pub fn with_speech(mut self, speech: SpeechOutput) -> Self {
        self.speech = Some(speech);
        self
    }
}

#[async_trait]
impl InboundHandler for Relay {
    async fn handle(&self, msg: InboundMessage) -> Result<(), CourierError> {
        let reply = match self
            .orchestrator
            .complete_turn(&msg.from, &msg.text, &msg.display_name)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                error!(conversation = %msg.from, error = %e, "turn failed, sending fallback reply");
                self.fallback_reply.clone()
            }
        };

        let body = to_whatsapp_text(&reply);
        self.channel
            .send(OutboundMessage::Text {
                to: msg.from.as_str().to_string(),
                body: body.clone(),
            })
            .await?;

        if let Some(speech) = &self.speech
            && let Err(e) = speech.write(&body).await
        {
            warn!(conversation = %msg.from, error = %e, "speech synthesis failed");
        }
        Ok(())
    }
}
