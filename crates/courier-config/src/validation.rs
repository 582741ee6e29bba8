// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks run after deserialization.
//!
//! All problems are collected before returning so the operator sees the
//! full list at once.

use crate::diagnostic::ConfigError;
use crate::model::{CourierConfig, StorageBackend};

/// Validate a deserialized configuration.
pub fn validate_config(config: &CourierConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.gateway.host.trim();
    if host.is_empty() {
        fail("gateway.host must not be empty".to_string());
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        fail(format!(
            "gateway.host `{host}` is not a valid IP address or hostname"
        ));
    }

    if config.run.poll_interval_ms == 0 {
        fail("run.poll_interval_ms must be greater than 0".to_string());
    }
    if config.run.max_poll_attempts == 0 {
        fail("run.max_poll_attempts must be greater than 0".to_string());
    }
    if config.run.max_tool_rounds == 0 {
        fail("run.max_tool_rounds must be greater than 0".to_string());
    }
    if config.run.fallback_reply.trim().is_empty() {
        fail("run.fallback_reply must not be empty".to_string());
    }

    if config.dedup.max_entries == Some(0) {
        fail("dedup.max_entries must be greater than 0 when set".to_string());
    }

    let needs_database =
        config.storage.backend == StorageBackend::Sqlite || config.dedup.persist;
    if needs_database && config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if !(0.25..=4.0).contains(&config.speech.speed) {
        fail(format!(
            "speech.speed must be between 0.25 and 4.0, got {}",
            config.speech.speed
        ));
    }
    if config.speech.enabled && config.speech.output_path.trim().is_empty() {
        fail("speech.output_path must not be empty when speech is enabled".to_string());
    }

    if config.openai.base_url.trim().is_empty() {
        fail("openai.base_url must not be empty".to_string());
    }
    if config.whatsapp.base_url.trim().is_empty() {
        fail("whatsapp.base_url must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
