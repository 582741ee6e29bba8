// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shop routes: company info, audio, flight catalog and ticket purchase.

use std::fmt::Write as _;

use axum::Form;
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use courier_core::types::OutboundMessage;
use courier_whatsapp::{find_flight, flight_confirmation, flights};

use crate::handlers::status_response;
use crate::server::GatewayState;

/// GET /company-info
pub async fn company_info(State(state): State<GatewayState>) -> Response {
    Json(json!({"status": "ok", "message": state.company_info})).into_response()
}

/// GET /audio
pub async fn audio(State(state): State<GatewayState>) -> Response {
    match tokio::fs::read(&state.audio_path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            status_response(StatusCode::NOT_FOUND, "Audio file not found")
        }
        Err(e) => {
            error!(path = %state.audio_path.display(), error = %e, "failed to read audio");
            status_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

/// GET /catalog
pub async fn catalog() -> Html<String> {
    let mut items = String::new();
    for flight in flights() {
        let _ = write!(
            items,
            r#"
    <li class="flight">
      <img src="{thumbnail}" alt="{destination}">
      <div><strong>{origin} &rarr; {destination}</strong><br>{time}</div>
      <form method="post" action="/buy-ticket">
        <input type="hidden" name="id" value="{id}">
        <button type="submit">Buy ticket</button>
      </form>
    </li>"#,
            thumbnail = flight.thumbnail,
            origin = flight.origin,
            destination = flight.destination,
            time = flight.time,
            id = flight.flight_id,
        );
    }
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Demo</title></head>
<body>
  <h1>Flights</h1>
  <ul>{items}
  </ul>
</body>
</html>
"#
    ))
}

#[derive(Debug, Deserialize)]
pub struct BuyTicketForm {
    pub id: String,
}

/// POST /buy-ticket
pub async fn buy_ticket(
    State(state): State<GatewayState>,
    Form(form): Form<BuyTicketForm>,
) -> Response {
    let Some(flight) = form.id.trim().parse().ok().and_then(find_flight) else {
        return status_response(StatusCode::NOT_FOUND, "Flight not found");
    };
    let Some(recipient) = state.recipient_waid.clone() else {
        error!("whatsapp.recipient_waid is not configured");
        return status_response(StatusCode::SERVICE_UNAVAILABLE, "Recipient not configured");
    };

    let msg = OutboundMessage::Template {
        to: recipient,
        template: flight_confirmation(flight),
    };
    if let Err(e) = state.channel.send(msg).await {
        error!(flight_id = flight.flight_id, error = %e, "failed to send ticket confirmation");
        return status_response(StatusCode::BAD_GATEWAY, "Failed to send confirmation");
    }
    info!(flight_id = flight.flight_id, "ticket confirmation sent");
    Redirect::to("/catalog").into_response()
}

/// POST /welcome
pub async fn welcome() -> Redirect {
    Redirect::to("/catalog")
}

/// GET /health
pub async fn health(State(state): State<GatewayState>) -> Response {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
    .into_response()
}
