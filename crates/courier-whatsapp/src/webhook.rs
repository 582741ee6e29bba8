// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound webhook classification and the subscription handshake.
//!
//! Payload shape (only the parts read here):
//!
//! ```json
//! {"object": "whatsapp_business_account",
//!  "entry": [{"changes": [{"value": {
//!     "contacts": [{"wa_id": "...", "profile": {"name": "..."}}],
//!     "messages": [{"from": "...", "id": "...", "type": "text", "text": {"body": "..."}}],
//!     "statuses": [...]
//!  }}]}]}
//! ```

use courier_core::types::{ConversationKey, InboundMessage};
use courier_core::CourierError;
use serde_json::Value;

/// What an inbound webhook payload represents.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    /// Delivery/read receipts for messages we sent.
    StatusUpdate,
    /// A user message with text the assistant can answer.
    Message(InboundMessage),
    /// A user message without usable text (media, reactions, ...).
    Unsupported { from: String, kind: String },
}

/// First change value of the first entry, if the envelope has one.
fn first_value(payload: &Value) -> Option<&Value> {
    payload
        .get("entry")?
        .get(0)?
        .get("changes")?
        .get(0)?
        .get("value")
}

/// True when the payload carries a non-empty `statuses` array.
pub fn is_status_update(payload: &Value) -> bool {
    first_value(payload)
        .and_then(|v| v.get("statuses"))
        .and_then(Value::as_array)
        .is_some_and(|s| !s.is_empty())
}

/// Classify a webhook payload.
///
/// Status updates are recognized before anything else. A payload that is
/// neither a status update nor an envelope holding at least one message
/// fails with [`CourierError::NotAWebhookEvent`].
pub fn classify(payload: &Value) -> Result<WebhookEvent, CourierError> {
    if is_status_update(payload) {
        return Ok(WebhookEvent::StatusUpdate);
    }
    if payload.get("object").is_none() {
        return Err(CourierError::NotAWebhookEvent);
    }

    let value = first_value(payload).ok_or(CourierError::NotAWebhookEvent)?;
    let message = value
        .get("messages")
        .and_then(|m| m.get(0))
        .ok_or(CourierError::NotAWebhookEvent)?;

    let from = message
        .get("from")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .ok_or(CourierError::NotAWebhookEvent)?
        .to_string();

    let contact = value.get("contacts").and_then(|c| c.get(0));
    let wa_id = contact
        .and_then(|c| c.get("wa_id"))
        .and_then(Value::as_str)
        .unwrap_or(&from)
        .to_string();
    let display_name = contact
        .and_then(|c| c.get("profile"))
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let kind = message
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("text")
        .to_string();

    let Some(text) = message_text(message, &kind) else {
        return Ok(WebhookEvent::Unsupported { from, kind });
    };

    Ok(WebhookEvent::Message(InboundMessage {
        message_id: message
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string),
        from: ConversationKey(wa_id),
        display_name,
        text,
    }))
}

fn message_text(message: &Value, kind: &str) -> Option<String> {
    let text = match kind {
        "text" => message.get("text")?.get("body")?.as_str(),
        "button" => message.get("button")?.get("text")?.as_str(),
        "interactive" => {
            let interactive = message.get("interactive")?;
            interactive
                .get("button_reply")
                .or_else(|| interactive.get("list_reply"))?
                .get("title")?
                .as_str()
        }
        _ => None,
    }?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Result of the `GET /webhook` subscription handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subscription {
    /// Echo the challenge back with 200.
    Verified(String),
    /// Mode or token did not match (403).
    Forbidden,
    /// `hub.mode` or `hub.verify_token` absent (400).
    MissingParameters,
}

/// Decide the handshake outcome.
///
/// An unconfigured `expected_token` never verifies.
pub fn verify_subscription(
    mode: Option<&str>,
    token: Option<&str>,
    challenge: Option<&str>,
    expected_token: Option<&str>,
) -> Subscription {
    let (Some(mode), Some(token)) = (
        mode.filter(|m| !m.is_empty()),
        token.filter(|t| !t.is_empty()),
    ) else {
        return Subscription::MissingParameters;
    };

    if mode == "subscribe" && expected_token.is_some_and(|expected| expected == token) {
        Subscription::Verified(challenge.unwrap_or_default().to_string())
    } else {
        Subscription::Forbidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_payload(body: &str) -> Value {
        json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "WABA_ID",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": {"display_phone_number": "15550000000", "phone_number_id": "PNID"},
                        "contacts": [{"profile": {"name": "Aruzhan"}, "wa_id": "77011234567"}],
                        "messages": [{
                            "from": "77011234567",
                            "id": "wamid.HBgL",
                            "timestamp": "1700000000",
                            "type": "text",
                            "text": {"body": body}
                        }]
                    }
                }]
            }]
        })
    }

    #[test]
    fn extracts_text_message() {
        let event = classify(&text_payload("Какие куртки есть?")).unwrap();
        let WebhookEvent::Message(msg) = event else {
            panic!("expected message, got {event:?}");
        };
        assert_eq!(msg.from.as_str(), "77011234567");
        assert_eq!(msg.display_name, "Aruzhan");
        assert_eq!(msg.text, "Какие куртки есть?");
        assert_eq!(msg.message_id.as_deref(), Some("wamid.HBgL"));
    }

    #[test]
    fn status_update_is_recognized_first() {
        let payload = json!({
            "object": "whatsapp_business_account",
            "entry": [{"changes": [{"value": {
                "statuses": [{"id": "wamid.X", "status": "delivered", "recipient_id": "7701"}]
            }}]}]
        });
        assert!(is_status_update(&payload));
        assert_eq!(classify(&payload).unwrap(), WebhookEvent::StatusUpdate);
    }

    #[test]
    fn empty_statuses_is_not_a_status_update() {
        let payload = json!({"object": "x", "entry": [{"changes": [{"value": {"statuses": []}}]}]});
        assert!(!is_status_update(&payload));
        assert!(matches!(classify(&payload), Err(CourierError::NotAWebhookEvent)));
    }

    #[test]
    fn non_envelopes_are_rejected() {
        for payload in [json!({}), json!([1, 2]), json!({"entry": []}), json!({"object": "page", "entry": [{}]})] {
            assert!(
                matches!(classify(&payload), Err(CourierError::NotAWebhookEvent)),
                "payload {payload} should be rejected"
            );
        }
    }

    #[test]
    fn media_message_is_unsupported() {
        let mut payload = text_payload("x");
        let message = &mut payload["entry"][0]["changes"][0]["value"]["messages"][0];
        message["type"] = json!("image");
        message.as_object_mut().unwrap().remove("text");
        assert_eq!(
            classify(&payload).unwrap(),
            WebhookEvent::Unsupported {
                from: "77011234567".into(),
                kind: "image".into()
            }
        );
    }

    #[test]
    fn subscription_handshake() {
        assert_eq!(
            verify_subscription(Some("subscribe"), Some("tok"), Some("1158201444"), Some("tok")),
            Subscription::Verified("1158201444".into())
        );
        assert_eq!(
            verify_subscription(Some("subscribe"), Some("bad"), Some("c"), Some("tok")),
            Subscription::Forbidden
        );
        assert_eq!(
            verify_subscription(Some("unsubscribe"), Some("tok"), Some("c"), Some("tok")),
            Subscription::Forbidden
        );
        assert_eq!(
            verify_subscription(Some("subscribe"), Some("tok"), Some("c"), None),
            Subscription::Forbidden
        );
        assert_eq!(
            verify_subscription(None, Some("tok"), Some("c"), Some("tok")),
            Subscription::MissingParameters
        );
    }
}
