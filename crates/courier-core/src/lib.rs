// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Courier relay.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Courier workspace. Adapter crates
//! implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

pub use error::CourierError;
pub use types::{
    AdapterType, ConversationKey, Fingerprint, HealthStatus, MessageId, RunId, RunStatus,
    ThreadId,
};

pub use traits::{
    AssistantAdapter, ChannelAdapter, FingerprintStore, InboundHandler, PluginAdapter,
    SpeechAdapter, ThreadStore,
};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn run_status_parses_api_strings() {
        let cases = [
            ("queued", RunStatus::Queued),
            ("in_progress", RunStatus::InProgress),
            ("requires_action", RunStatus::RequiresAction),
            ("completed", RunStatus::Completed),
            ("failed", RunStatus::Failed),
            ("cancelled", RunStatus::Cancelled),
            ("expired", RunStatus::Expired),
        ];
        for (raw, expected) in cases {
            let from_json: RunStatus =
                serde_json::from_value(serde_json::Value::String(raw.into())).unwrap();
            assert_eq!(from_json, expected);
            assert_eq!(RunStatus::from_str(raw).unwrap(), expected);
            assert_eq!(expected.to_string(), raw);
        }
    }

    #[test]
    fn unrecognized_run_status_maps_to_unknown() {
        let status: RunStatus = serde_json::from_str("\"paused_for_review\"").unwrap();
        assert_eq!(status, RunStatus::Unknown);
        assert!(!status.is_pending());
    }

    #[test]
    fn only_queued_and_in_progress_are_pending() {
        assert!(RunStatus::Queued.is_pending());
        assert!(RunStatus::InProgress.is_pending());
        assert!(!RunStatus::RequiresAction.is_pending());
        assert!(!RunStatus::Completed.is_pending());
        assert!(!RunStatus::Cancelling.is_pending());
    }

    #[test]
    fn run_failed_message_includes_reason() {
        let err = CourierError::RunFailed {
            run_id: "run_1".into(),
            status: "failed".into(),
            reason: Some("rate_limit_exceeded".into()),
        };
        assert_eq!(
            err.to_string(),
            "run run_1 ended with status `failed`: rate_limit_exceeded"
        );

        let bare = CourierError::RunFailed {
            run_id: "run_2".into(),
            status: "expired".into(),
            reason: None,
        };
        assert_eq!(bare.to_string(), "run run_2 ended with status `expired`");
    }

    #[test]
    fn turn_failures_are_classified() {
        assert!(CourierError::UnknownTool { name: "x".into() }.is_turn_failure());
        assert!(
            CourierError::RunTimeout {
                run_id: "r".into(),
                attempts: 3
            }
            .is_turn_failure()
        );
        assert!(!CourierError::InvalidPayload("bad".into()).is_turn_failure());
        assert!(!CourierError::NotAWebhookEvent.is_turn_failure());
    }

    #[test]
    fn outbound_recipient() {
        let text = types::OutboundMessage::Text {
            to: "15550001".into(),
            body: "hi".into(),
        };
        assert_eq!(text.recipient(), "15550001");
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_assistant_adapter<T: AssistantAdapter>() {}
        fn _assert_channel_adapter<T: ChannelAdapter>() {}
        fn _assert_speech_adapter<T: SpeechAdapter>() {}
        fn _assert_fingerprint_store<T: FingerprintStore>() {}
        fn _assert_thread_store<T: ThreadStore>() {}
        fn _assert_inbound_handler<T: InboundHandler>() {}
    }
}
