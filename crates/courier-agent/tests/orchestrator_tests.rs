// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn scenarios against a scripted assistant.

use std::sync::Arc;
use std::time::Duration;

use courier_agent::{ConversationResolver, RunOrchestrator, TurnSettings};
use courier_config::CourierConfig;
use courier_core::CourierError;
use courier_core::types::{ConversationKey, RunStatus};
use courier_storage::MemoryThreadStore;
use courier_test_utils::{RunStep, ScriptedAssistant};
use courier_tools::ToolDispatcher;

fn settings() -> TurnSettings {
    TurnSettings {
        assistant_id: "asst_shop".into(),
        model: None,
        instructions: None,
        poll_interval: Duration::from_millis(1),
        max_poll_attempts: 5,
        max_tool_rounds: 3,
    }
}

fn orchestrator(assistant: Arc<ScriptedAssistant>, settings: TurnSettings) -> RunOrchestrator {
    let resolver = Arc::new(ConversationResolver::new(
        Arc::new(MemoryThreadStore::new()),
        assistant.clone(),
        true,
    ));
    RunOrchestrator::new(resolver, assistant, ToolDispatcher::new(), settings)
}

fn key() -> ConversationKey {
    ConversationKey("77011234567".into())
}

#[tokio::test]
async fn queued_then_completed_returns_reply_after_one_poll() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![
        RunStep::queued(),
        RunStep::completed("Hello!"),
    ]));
    let orchestrator = orchestrator(assistant.clone(), settings());

    let reply = orchestrator.complete_turn(&key(), "Hi", "Aigerim").await.unwrap();

    assert_eq!(reply, "Hello!");
    assert_eq!(assistant.polls(), 1);
    let messages = assistant.user_messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].1, "Hi");
}

#[tokio::test]
async fn tool_call_output_is_submitted_before_completion() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![
        RunStep::queued(),
        RunStep::requires_action(&[("call_1", "get_weather", r#"{"location":"Astana","unit":"c"}"#)]),
        RunStep::in_progress(),
        RunStep::completed("В Астане тепло"),
    ]));
    let orchestrator = orchestrator(assistant.clone(), settings());

    let reply = orchestrator
        .complete_turn(&key(), "Какая погода?", "Aigerim")
        .await
        .unwrap();

    assert_eq!(reply, "В Астане тепло");
    let submissions = assistant.submissions().await;
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].len(), 1);
    assert_eq!(submissions[0][0].tool_call_id, "call_1");
    assert!(submissions[0][0].output.contains("77"));
}

#[tokio::test]
async fn multiple_tool_calls_are_submitted_together_in_order() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![
        RunStep::requires_action(&[
            ("call_a", "get_top_3_products", ""),
            ("call_b", "get_weather", r#"{"location":"Astana"}"#),
        ]),
        RunStep::completed("Готово"),
    ]));
    let orchestrator = orchestrator(assistant.clone(), settings());

    orchestrator.complete_turn(&key(), "?", "A").await.unwrap();

    let submissions = assistant.submissions().await;
    assert_eq!(submissions.len(), 1);
    let ids: Vec<_> = submissions[0].iter().map(|o| o.tool_call_id.as_str()).collect();
    assert_eq!(ids, ["call_a", "call_b"]);
}

#[tokio::test]
async fn unknown_tool_surfaces_error_without_submitting() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![
        RunStep::requires_action(&[("call_1", "book_flight", "{}")]),
        RunStep::completed("unreachable"),
    ]));
    let orchestrator = orchestrator(assistant.clone(), settings());

    let err = orchestrator.complete_turn(&key(), "Hi", "A").await.unwrap_err();

    assert!(
        matches!(&err, CourierError::UnknownTool { name } if name == "book_flight"),
        "got: {err:?}"
    );
    assert!(assistant.submissions().await.is_empty());
}

#[tokio::test]
async fn pending_run_times_out_at_attempt_ceiling() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![RunStep::in_progress()]));
    let orchestrator = orchestrator(assistant.clone(), settings());

    let err = tokio::time::timeout(
        Duration::from_secs(5),
        orchestrator.complete_turn(&key(), "Hi", "A"),
    )
    .await
    .expect("turn must end on its own")
    .unwrap_err();

    assert!(
        matches!(err, CourierError::RunTimeout { attempts: 5, .. }),
        "got: {err:?}"
    );
    assert_eq!(assistant.polls(), 5);
}

#[tokio::test]
async fn failed_run_carries_reason() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![
        RunStep::queued(),
        RunStep::failed("rate_limit_exceeded"),
    ]));
    let orchestrator = orchestrator(assistant, settings());

    let err = orchestrator.complete_turn(&key(), "Hi", "A").await.unwrap_err();

    let CourierError::RunFailed { status, reason, .. } = err else {
        panic!("expected RunFailed, got {err:?}");
    };
    assert_eq!(status, "failed");
    assert_eq!(reason.as_deref(), Some("rate_limit_exceeded"));
}

#[tokio::test]
async fn expired_run_is_a_failure() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![RunStep::with_status(
        RunStatus::Expired,
    )]));
    let orchestrator = orchestrator(assistant, settings());

    let err = orchestrator.complete_turn(&key(), "Hi", "A").await.unwrap_err();
    assert!(
        matches!(&err, CourierError::RunFailed { status, .. } if status == "expired"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn endless_tool_requests_are_capped() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![RunStep::requires_action(&[(
        "call_1",
        "get_top_3_products",
        "{}",
    )])]));
    let orchestrator = orchestrator(assistant.clone(), settings());

    let err = orchestrator.complete_turn(&key(), "Hi", "A").await.unwrap_err();

    assert!(
        matches!(&err, CourierError::RunFailed { status, .. } if status == "requires_action"),
        "got: {err:?}"
    );
    assert_eq!(assistant.submissions().await.len(), 3);
}

#[tokio::test]
async fn run_request_carries_overrides_and_tools() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![RunStep::completed("ok")]));
    let mut settings = settings();
    settings.model = Some("gpt-4o-mini".into());
    settings.instructions = Some("Address the user as {name}.".into());
    let orchestrator = orchestrator(assistant.clone(), settings);

    orchestrator.complete_turn(&key(), "Hi", "Aigerim").await.unwrap();

    let requests = assistant.run_requests().await;
    assert_eq!(requests[0].assistant_id, "asst_shop");
    assert_eq!(requests[0].model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(
        requests[0].instructions.as_deref(),
        Some("Address the user as Aigerim.")
    );
    assert_eq!(requests[0].tools.len(), 2);
}

#[tokio::test]
async fn second_turn_reuses_thread() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![RunStep::completed("one")]));
    let orchestrator = orchestrator(assistant.clone(), settings());

    orchestrator.complete_turn(&key(), "first", "A").await.unwrap();
    assistant.script(vec![RunStep::completed("two")]).await;
    let reply = orchestrator.complete_turn(&key(), "second", "A").await.unwrap();

    assert_eq!(reply, "two");
    assert_eq!(assistant.threads_created(), 1);
    let messages = assistant.user_messages().await;
    assert_eq!(messages[0].0, messages[1].0);
}

#[tokio::test]
async fn completed_run_without_new_reply_does_not_repeat_previous_answer() {
    let assistant = Arc::new(ScriptedAssistant::new(vec![RunStep::completed("first answer")]));
    let orchestrator = orchestrator(assistant.clone(), settings());

    let first = orchestrator.complete_turn(&key(), "first", "A").await.unwrap();
    assert_eq!(first, "first answer");

    assistant
        .script(vec![RunStep::with_status(RunStatus::Completed)])
        .await;
    let err = orchestrator
        .complete_turn(&key(), "second", "A")
        .await
        .unwrap_err();

    assert!(
        matches!(&err, CourierError::RunFailed { status, .. } if status == "completed"),
        "got: {err:?}"
    );
    assert_eq!(assistant.threads_created(), 1);
}

#[test]
fn settings_require_assistant_id() {
    let config = CourierConfig::default();
    assert!(matches!(
        TurnSettings::from_config(&config),
        Err(CourierError::Config(_))
    ));

    let mut config = CourierConfig::default();
    config.openai.assistant_id = Some("asst_1".into());
    config.run.max_poll_attempts = 9;
    let settings = TurnSettings::from_config(&config).unwrap();
    assert_eq!(settings.assistant_id, "asst_1");
    assert_eq!(settings.max_poll_attempts, 9);
    assert_eq!(settings.poll_interval, Duration::from_millis(500));
}
