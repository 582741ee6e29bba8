// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound messages through the Graph API `/{phone_number_id}/messages`.

use std::time::Duration;

use async_trait::async_trait;
use courier_config::CourierConfig;
use courier_core::traits::{ChannelAdapter, PluginAdapter};
use courier_core::types::{AdapterType, HealthStatus, MessageId, OutboundMessage};
use courier_core::CourierError;
use serde_json::{Value, json};
use tracing::{debug, error, info};

/// WhatsApp Cloud API channel.
pub struct WhatsAppChannel {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl WhatsAppChannel {
    /// Creates the channel from the `[whatsapp]` section.
    ///
    /// Requires `access_token` and `phone_number_id`.
    pub fn new(config: &CourierConfig) -> Result<Self, CourierError> {
        let wa = &config.whatsapp;
        let access_token = non_empty(&wa.access_token).ok_or_else(|| {
            CourierError::Config(
                "WhatsApp access token not found: set whatsapp.access_token or ACCESS_TOKEN".into(),
            )
        })?;
        let phone_number_id = non_empty(&wa.phone_number_id).ok_or_else(|| {
            CourierError::Config(
                "WhatsApp phone number id not found: set whatsapp.phone_number_id or PHONE_NUMBER_ID"
                    .into(),
            )
        })?;
        let endpoint = format!(
            "{}/{}/{}/messages",
            wa.base_url.trim_end_matches('/'),
            wa.api_version,
            phone_number_id
        );
        let channel = Self::with_endpoint(
            endpoint,
            access_token.to_string(),
            Duration::from_secs(wa.send_timeout_secs),
        )?;
        info!(phone_number_id, "WhatsApp channel initialized");
        Ok(channel)
    }

    /// Creates a channel posting to an explicit messages endpoint.
    pub fn with_endpoint(
        endpoint: String,
        access_token: String,
        timeout: Duration,
    ) -> Result<Self, CourierError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CourierError::Channel {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            endpoint,
            access_token,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Graph API request body for a message.
pub fn message_payload(msg: &OutboundMessage) -> Value {
    match msg {
        OutboundMessage::Text { to, body } => json!({
            "messaging_product": "whatsapp",
            "recipient_type": "individual",
            "to": to,
            "type": "text",
            "text": {"preview_url": false, "body": body}
        }),
        OutboundMessage::Template { to, template } => json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "template",
            "template": {
                "name": template.name,
                "language": {"code": template.language_code},
                "components": template.components
            }
        }),
    }
}

#[async_trait]
impl PluginAdapter for WhatsAppChannel {
    fn name(&self) -> &str {
        "whatsapp-cloud"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CourierError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for WhatsAppChannel {
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, CourierError> {
        let payload = message_payload(&msg);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(to = msg.recipient(), "timeout while sending message");
                }
                CourierError::Channel {
                    message: format!("send failed: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(CourierError::Channel {
                message: format!("Graph API returned {status}: {body}"),
                source: None,
            });
        }

        let id = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v["messages"][0]["id"].as_str().map(str::to_string))
            .unwrap_or_default();
        debug!(to = msg.recipient(), message_id = %id, "message sent");
        Ok(MessageId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::types::TemplateMessage;

    #[test]
    fn text_payload_shape() {
        let payload = message_payload(&OutboundMessage::Text {
            to: "7701".into(),
            body: "*Привет*".into(),
        });
        assert_eq!(payload["recipient_type"], "individual");
        assert_eq!(payload["text"]["preview_url"], false);
        assert_eq!(payload["text"]["body"], "*Привет*");
    }

    #[test]
    fn template_payload_shape() {
        let payload = message_payload(&OutboundMessage::Template {
            to: "7701".into(),
            template: TemplateMessage {
                name: "hello_world".into(),
                language_code: "en_US".into(),
                components: vec![],
            },
        });
        assert_eq!(payload["type"], "template");
        assert_eq!(payload["template"]["language"]["code"], "en_US");
    }

    #[test]
    fn requires_credentials() {
        let config = CourierConfig::default();
        assert!(matches!(
            WhatsAppChannel::new(&config),
            Err(CourierError::Config(_))
        ));
    }
}
