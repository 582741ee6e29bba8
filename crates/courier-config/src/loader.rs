// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./courier.toml` > `~/.config/courier/courier.toml` > `/etc/courier/courier.toml`
//! with environment variable overrides via `COURIER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CourierConfig;

/// Sections whose env keys are mapped from `COURIER_<SECTION>_<KEY>`.
const SECTIONS: &[&str] = &[
    "agent", "gateway", "whatsapp", "openai", "run", "dedup", "storage", "speech", "company",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/courier/courier.toml` (system-wide)
/// 3. `~/.config/courier/courier.toml` (user XDG config)
/// 4. `./courier.toml` (local directory)
/// 5. `COURIER_*` environment variables
/// 6. Legacy secret variables (`OPENAI_API_KEY`, `ACCESS_TOKEN`, ...) for unset secrets
pub fn load_config() -> Result<CourierConfig, figment::Error> {
    build_figment().extract().map(apply_legacy_env)
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<CourierConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CourierConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
        .map(apply_legacy_env)
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::file("/etc/courier/courier.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("courier/courier.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("courier.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `COURIER_WHATSAPP_APP_SECRET` must map to `whatsapp.app_secret`,
/// not `whatsapp.app.secret`.
fn env_provider() -> Env {
    Env::prefixed("COURIER_").map(|key| {
        let key_str = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.to_string().into()
    })
}

/// Fill unset secrets from the variable names used by existing deployments.
fn apply_legacy_env(mut config: CourierConfig) -> CourierConfig {
    fn fill(slot: &mut Option<String>, var: &str) {
        if slot.is_none()
            && let Ok(value) = std::env::var(var)
            && !value.trim().is_empty()
        {
            *slot = Some(value);
        }
    }

    fill(&mut config.openai.api_key, "OPENAI_API_KEY");
    fill(&mut config.openai.assistant_id, "OPENAI_ASSISTANT_ID");
    fill(&mut config.whatsapp.access_token, "ACCESS_TOKEN");
    fill(&mut config.whatsapp.app_secret, "APP_SECRET");
    fill(&mut config.whatsapp.verify_token, "VERIFY_TOKEN");
    fill(&mut config.whatsapp.phone_number_id, "PHONE_NUMBER_ID");
    fill(&mut config.whatsapp.recipient_waid, "RECIPIENT_WAID");
    config
}
