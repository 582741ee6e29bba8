// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `GET /webhook` handshake and `POST /webhook` event intake.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use courier_core::CourierError;
use courier_whatsapp::{
    SIGNATURE_HEADER, Subscription, WebhookEvent, classify, verify_signature, verify_subscription,
};

use crate::server::GatewayState;

/// How an accepted webhook event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Delivery receipt; acknowledged without processing.
    StatusUpdate,
    /// Seen before; acknowledged without processing.
    Duplicate,
    /// Message without text; acknowledged without processing.
    Unsupported,
    /// Passed to the inbound handler.
    Handled,
}

pub(crate) fn status_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"status": "error", "message": message}))).into_response()
}

fn ok_response() -> Response {
    (StatusCode::OK, Json(json!({"status": "ok"}))).into_response()
}

/// GET /webhook
pub async fn verify_webhook(
    State(state): State<GatewayState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let outcome = verify_subscription(
        params.get("hub.mode").map(String::as_str),
        params.get("hub.verify_token").map(String::as_str),
        params.get("hub.challenge").map(String::as_str),
        state.verify_token.as_deref(),
    );
    match outcome {
        Subscription::Verified(challenge) => {
            info!("webhook verified");
            (StatusCode::OK, challenge).into_response()
        }
        Subscription::Forbidden => {
            warn!("webhook verification failed");
            status_response(StatusCode::FORBIDDEN, "Verification failed")
        }
        Subscription::MissingParameters => {
            status_response(StatusCode::BAD_REQUEST, "Missing parameters")
        }
    }
}

/// POST /webhook
pub async fn receive_webhook(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(secret) = state.app_secret.as_deref() {
        let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
        if let Err(e) = verify_signature(&body, signature, secret) {
            warn!(error = %e, "rejecting webhook");
            return status_response(StatusCode::FORBIDDEN, "Invalid signature");
        }
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "webhook body is not JSON");
            return status_response(StatusCode::BAD_REQUEST, "Invalid JSON provided");
        }
    };

    match process_event(&state, &payload).await {
        Ok(outcome) => {
            debug!(?outcome, "webhook acknowledged");
            ok_response()
        }
        Err(CourierError::NotAWebhookEvent) => {
            status_response(StatusCode::NOT_FOUND, "Not a WhatsApp API event")
        }
        Err(e) => {
            error!(error = %e, "webhook processing failed");
            status_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

/// Classifies `payload`, drops duplicates and hands new messages to the
/// inbound handler.
///
/// Status updates return before the fingerprint guard is consulted. Handler
/// failures are logged and still count as handled: a redelivery would be
/// suppressed as a duplicate anyway.
pub async fn process_event(
    state: &GatewayState,
    payload: &Value,
) -> Result<WebhookOutcome, CourierError> {
    let msg = match classify(payload)? {
        WebhookEvent::StatusUpdate => {
            debug!("status update received");
            return Ok(WebhookOutcome::StatusUpdate);
        }
        WebhookEvent::Unsupported { from, kind } => {
            info!(conversation = %from, kind = %kind, "ignoring message without text");
            return Ok(WebhookOutcome::Unsupported);
        }
        WebhookEvent::Message(msg) => msg,
    };

    if state.guard.is_duplicate(payload).await? {
        info!(conversation = %msg.from, "request has already been processed");
        return Ok(WebhookOutcome::Duplicate);
    }

    let conversation = msg.from.clone();
    if let Err(e) = state.handler.handle(msg).await {
        error!(conversation = %conversation, error = %e, "inbound handler failed");
    }
    Ok(WebhookOutcome::Handled)
}
