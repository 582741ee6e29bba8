// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-to-speech over `POST /audio/speech`.

use async_trait::async_trait;
use courier_config::CourierConfig;
use courier_core::error::CourierError;
use courier_core::traits::{PluginAdapter, SpeechAdapter};
use courier_core::types::{AdapterType, HealthStatus};
use tracing::debug;

use crate::client::OpenAiClient;
use crate::types::SpeechRequest;

/// Speech adapter producing MP3 audio.
pub struct OpenAiSpeech {
    client: OpenAiClient,
    model: String,
    voice: String,
    speed: f32,
}

impl OpenAiSpeech {
    pub fn new(config: &CourierConfig) -> Result<Self, CourierError> {
        Ok(Self::with_client(
            crate::client_from_config(config)?,
            config.speech.model.clone(),
            config.speech.voice.clone(),
            config.speech.speed,
        ))
    }

    pub fn with_client(client: OpenAiClient, model: String, voice: String, speed: f32) -> Self {
        Self {
            client,
            model,
            voice,
            speed,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiSpeech {
    fn name(&self) -> &str {
        "openai-speech"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Speech
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CourierError> {
        Ok(())
    }
}

#[async_trait]
impl SpeechAdapter for OpenAiSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, CourierError> {
        let body = SpeechRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            speed: self.speed,
            response_format: "mp3",
        };
        let audio = self.client.request_bytes("/audio/speech", &body).await?;
        debug!(bytes = audio.len(), voice = %self.voice, "speech synthesized");
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_voice_settings_and_returns_audio() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .and(body_partial_json(serde_json::json!({
                "model": "tts-1", "voice": "alloy", "input": "Привет"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xFB, 0x90]))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test", Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.uri());
        let speech = OpenAiSpeech::with_client(client, "tts-1".into(), "alloy".into(), 1.4);
        let audio = speech.synthesize("Привет").await.unwrap();
        assert_eq!(audio, vec![0xFF, 0xFB, 0x90]);
    }
}
