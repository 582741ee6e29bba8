// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router, shared state and server lifecycle.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::routing::{get, post};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use courier_core::CourierError;
use courier_core::traits::{ChannelAdapter, InboundHandler};
use courier_dedup::FingerprintGuard;

use crate::{handlers, pages};

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub guard: FingerprintGuard,
    /// Receives every new, answerable user message.
    pub handler: Arc<dyn InboundHandler>,
    /// Outbound channel for ticket confirmations.
    pub channel: Arc<dyn ChannelAdapter>,
    /// `X-Hub-Signature-256` secret. `None` skips verification.
    pub app_secret: Option<String>,
    pub verify_token: Option<String>,
    /// Recipient of ticket confirmations.
    pub recipient_waid: Option<String>,
    pub company_info: String,
    pub audio_path: PathBuf,
    pub start_time: Instant,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the application router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route(
            "/webhook",
            get(handlers::verify_webhook).post(handlers::receive_webhook),
        )
        .route("/company-info", get(pages::company_info))
        .route("/audio", get(pages::audio))
        .route("/catalog", get(pages::catalog))
        .route("/buy-ticket", post(pages::buy_ticket))
        .route("/welcome", post(pages::welcome))
        .route("/health", get(pages::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `host:port` and serves until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), CourierError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CourierError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| CourierError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway stopped");
    Ok(())
}
