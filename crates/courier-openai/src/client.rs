// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Assistants and audio endpoints.
//!
//! [`OpenAiClient`] owns authentication headers, connection pooling and the
//! bounded retry policy shared by every call.

use std::time::Duration;

use courier_core::CourierError;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::ApiErrorResponse;

/// Default API root.
pub const API_BASE_URL: &str = "https://api.openai.com/v1";

/// HTTP client for OpenAI API communication.
///
/// Transient failures are retried with exponential backoff. For idempotent
/// methods that covers rate limits, 5xx responses, timeouts and connection
/// failures. A POST may already have taken effect when it times out or gets a
/// 5xx (a second user message, a second run), so POSTs are retried only on
/// 429 and on connection failures, where the server did not act on them.
/// Once retries run out the call fails with [`CourierError::Transient`]; any
/// other failure is [`CourierError::AssistantUnavailable`].
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_backoff: Duration,
}

impl OpenAiClient {
    /// Creates a client authenticated with `api_key`.
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, CourierError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| CourierError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);
        headers.insert("OpenAI-Beta", HeaderValue::from_static("assistants=v2"));
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CourierError::AssistantUnavailable {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
        })
    }

    /// Overrides the API root (self-hosted proxies, wiremock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets how many times a transient failure is retried and the first delay.
    ///
    /// Applies to POSTs only for 429 responses and connection failures.
    pub fn with_retry_policy(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = backoff;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a JSON request and decodes the JSON response.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, CourierError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, body).await?;
        let text = response
            .text()
            .await
            .map_err(|e| CourierError::AssistantUnavailable {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;
        serde_json::from_str(&text).map_err(|e| CourierError::AssistantUnavailable {
            message: format!("failed to parse API response from {path}: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Sends a JSON request and returns the raw response body.
    pub async fn request_bytes<B>(&self, path: &str, body: &B) -> Result<Vec<u8>, CourierError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.execute(Method::POST, path, Some(body)).await?;
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| CourierError::AssistantUnavailable {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })
    }

    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, CourierError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        let idempotent = method.is_idempotent();
        let mut last_error = String::new();

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_backoff * 2u32.saturating_pow(attempt - 1);
                warn!(
                    path,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after transient error"
                );
                tokio::time::sleep(delay).await;
            }

            let mut builder = self.client.request(method.clone(), &url);
            if let Some(body) = body {
                builder = builder.json(body);
            }

            match builder.send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(%method, path, status = %status, attempt, "response received");
                    if status.is_success() {
                        return Ok(response);
                    }

                    let body = response.text().await.unwrap_or_default();
                    let message = describe_error(status, &body);
                    if is_transient_error(status)
                        && (idempotent || status == StatusCode::TOO_MANY_REQUESTS)
                    {
                        warn!(path, status = %status, "transient API error");
                        last_error = message;
                        continue;
                    }
                    return Err(CourierError::AssistantUnavailable {
                        message,
                        source: None,
                    });
                }
                Err(e) if e.is_connect() || (idempotent && e.is_timeout()) => {
                    warn!(path, error = %e, "request did not complete");
                    last_error = format!("HTTP request failed: {e}");
                }
                Err(e) => {
                    return Err(CourierError::AssistantUnavailable {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    });
                }
            }
        }

        Err(CourierError::Transient {
            message: last_error,
            attempts: self.max_retries + 1,
        })
    }
}

fn describe_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!(
            "OpenAI API error ({}, {status}): {}",
            api_err.error.type_.as_deref().unwrap_or("unknown"),
            api_err.error.message
        ),
        Err(_) => format!("API returned {status}: {body}"),
    }
}

/// Returns true for HTTP status codes worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}
