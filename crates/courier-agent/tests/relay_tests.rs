// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relay behaviour: reply formatting, fallback and speech output.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use courier_agent::{ConversationResolver, Relay, RunOrchestrator, SpeechOutput, TurnSettings};
use courier_core::traits::{InboundHandler, PluginAdapter, SpeechAdapter};
use courier_core::types::{
    AdapterType, ConversationKey, HealthStatus, InboundMessage, OutboundMessage,
};
use courier_core::CourierError;
use courier_storage::MemoryThreadStore;
use courier_test_utils::{RecordingChannel, RunStep, ScriptedAssistant};
use courier_tools::ToolDispatcher;

const FALLBACK: &str = "Sorry, try again later.";

fn relay(steps: Vec<RunStep>, channel: Arc<RecordingChannel>) -> Relay {
    let assistant = Arc::new(ScriptedAssistant::new(steps));
    let resolver = Arc::new(ConversationResolver::new(
        Arc::new(MemoryThreadStore::new()),
        assistant.clone(),
        true,
    ));
    let settings = TurnSettings {
        assistant_id: "asst_shop".into(),
        model: None,
        instructions: None,
        poll_interval: Duration::from_millis(1),
        max_poll_attempts: 3,
        max_tool_rounds: 2,
    };
    let orchestrator = Arc::new(RunOrchestrator::new(
        resolver,
        assistant,
        ToolDispatcher::new(),
        settings,
    ));
    Relay::new(orchestrator, channel, FALLBACK.to_string())
}

fn inbound(text: &str) -> InboundMessage {
    InboundMessage {
        message_id: Some("wamid.IN1".into()),
        from: ConversationKey("77011234567".into()),
        display_name: "Aigerim".into(),
        text: text.into(),
    }
}

#[tokio::test]
async fn reply_is_formatted_and_sent_to_sender() {
    let channel = Arc::new(RecordingChannel::new());
    let relay = relay(
        vec![RunStep::completed("**Новинка** в каталоге【4:0†source】")],
        channel.clone(),
    );

    relay.handle(inbound("Что нового?")).await.unwrap();

    let sent = channel.sent_messages().await;
    assert_eq!(
        sent,
        vec![OutboundMessage::Text {
            to: "77011234567".into(),
            body: "*Новинка* в каталоге".into(),
        }]
    );
}

#[tokio::test]
async fn turn_failure_sends_fallback_reply() {
    let channel = Arc::new(RecordingChannel::new());
    let relay = relay(vec![RunStep::in_progress()], channel.clone());

    relay.handle(inbound("Hi")).await.unwrap();

    let sent = channel.sent_messages().await;
    assert_eq!(sent.len(), 1);
    let OutboundMessage::Text { body, .. } = &sent[0] else {
        panic!("expected text message");
    };
    assert_eq!(body, FALLBACK);
}

#[tokio::test]
async fn channel_failure_is_returned() {
    let channel = Arc::new(RecordingChannel::new());
    channel.fail_sends();
    let relay = relay(vec![RunStep::completed("ok")], channel);

    let err = relay.handle(inbound("Hi")).await.unwrap_err();
    assert!(matches!(err, CourierError::Channel { .. }), "got: {err:?}");
}

struct FixedSpeech {
    fail: bool,
}

#[async_trait]
impl PluginAdapter for FixedSpeech {
    fn name(&self) -> &str {
        "fixed-speech"
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
impl SpeechAdapter for FixedSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, CourierError> {
        if self.fail {
            return Err(CourierError::AssistantUnavailable {
                message: "tts down".into(),
                source: None,
            });
        }
        Ok(format!("mp3:{text}").into_bytes())
    }
}

#[tokio::test]
async fn speech_is_written_to_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reply.mp3");
    let channel = Arc::new(RecordingChannel::new());
    let relay = relay(vec![RunStep::completed("Привет")], channel)
        .with_speech(SpeechOutput::new(Arc::new(FixedSpeech { fail: false }), &path));

    relay.handle(inbound("Hi")).await.unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), "mp3:Привет".as_bytes());
}

#[tokio::test]
async fn speech_failure_does_not_fail_the_turn() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reply.mp3");
    let channel = Arc::new(RecordingChannel::new());
    let relay = relay(vec![RunStep::completed("Привет")], channel.clone())
        .with_speech(SpeechOutput::new(Arc::new(FixedSpeech { fail: true }), &path));

    relay.handle(inbound("Hi")).await.unwrap();

    assert_eq!(channel.sent_count().await, 1);
    assert!(!path.exists());
}
