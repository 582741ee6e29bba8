// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signal handling for graceful shutdown.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Installs handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] cancelled when either signal arrives.
pub fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        wait_for_signal().await;
        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            warn!(error = %e, "failed to install SIGTERM handler, listening for Ctrl+C only");
            let _ = tokio::signal::ctrl_c().await;
            info!("received SIGINT (Ctrl+C), initiating shutdown");
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("received SIGINT (Ctrl+C), initiating shutdown");
        }
        _ = sigterm.recv() => {
            info!("received SIGTERM, initiating shutdown");
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("received Ctrl+C, initiating shutdown");
}
