// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound delivery against a mock Graph API.

use courier_config::CourierConfig;
use courier_core::types::OutboundMessage;
use courier_core::{ChannelAdapter, CourierError};
use courier_whatsapp::{WhatsAppChannel, find_flight, flight_confirmation};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn channel(server: &MockServer) -> WhatsAppChannel {
    let mut config = CourierConfig::default();
    config.whatsapp.access_token = Some("EAAG-token".into());
    config.whatsapp.phone_number_id = Some("1099".into());
    config.whatsapp.base_url = server.uri();
    WhatsAppChannel::new(&config).unwrap()
}

#[tokio::test]
async fn sends_text_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v18.0/1099/messages"))
        .and(header("authorization", "Bearer EAAG-token"))
        .and(body_partial_json(json!({
            "to": "77011234567", "type": "text", "text": {"body": "Здравствуйте!"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messaging_product": "whatsapp",
            "contacts": [{"input": "77011234567", "wa_id": "77011234567"}],
            "messages": [{"id": "wamid.OUT1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = channel(&server)
        .send(OutboundMessage::Text {
            to: "77011234567".into(),
            body: "Здравствуйте!".into(),
        })
        .await
        .unwrap();
    assert_eq!(id.0, "wamid.OUT1");
}

#[tokio::test]
async fn sends_flight_confirmation_template() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v18.0/1099/messages"))
        .and(body_partial_json(json!({
            "type": "template",
            "template": {"name": "sample_flight_confirmation"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messages": [{"id": "wamid.T"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let template = flight_confirmation(find_flight(1).unwrap());
    channel(&server)
        .send(OutboundMessage::Template {
            to: "15550001".into(),
            template,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn graph_error_is_channel_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid OAuth access token.", "code": 190}
        })))
        .mount(&server)
        .await;

    let err = channel(&server)
        .send(OutboundMessage::Text {
            to: "1".into(),
            body: "x".into(),
        })
        .await
        .unwrap_err();
    let CourierError::Channel { message, .. } = err else {
        panic!("expected Channel error");
    };
    assert!(message.contains("401"), "got: {message}");
}
