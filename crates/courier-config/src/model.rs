// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Courier relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Courier configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourierConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Local HTTP server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// WhatsApp Cloud API settings.
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// OpenAI Assistants API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Assistant run polling and thread policy.
    #[serde(default)]
    pub run: RunConfig,

    /// Duplicate webhook suppression.
    #[serde(default)]
    pub dedup: DedupConfig,

    /// Thread mapping persistence.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Text-to-speech of assistant replies.
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Static shop information served over HTTP.
    #[serde(default)]
    pub company: CompanyConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the relay.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "courier".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Local HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "0.0.0.0".to_string()
}

fn default_gateway_port() -> u16 {
    8000
}

/// WhatsApp Cloud API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WhatsAppConfig {
    /// Graph API access token. Falls back to `ACCESS_TOKEN`.
    #[serde(default)]
    pub access_token: Option<String>,

    /// App secret for `X-Hub-Signature-256` verification. `None` disables the check.
    /// Falls back to `APP_SECRET`.
    #[serde(default)]
    pub app_secret: Option<String>,

    /// Token echoed during webhook verification. Falls back to `VERIFY_TOKEN`.
    #[serde(default)]
    pub verify_token: Option<String>,

    /// Sending phone number id. Falls back to `PHONE_NUMBER_ID`.
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// Recipient of catalog ticket confirmations. Falls back to `RECIPIENT_WAID`.
    #[serde(default)]
    pub recipient_waid: Option<String>,

    /// Graph API version segment.
    #[serde(default = "default_graph_version")]
    pub api_version: String,

    /// Graph API base URL.
    #[serde(default = "default_graph_base_url")]
    pub base_url: String,

    /// Outbound send timeout in seconds.
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            app_secret: None,
            verify_token: None,
            phone_number_id: None,
            recipient_waid: None,
            api_version: default_graph_version(),
            base_url: default_graph_base_url(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

fn default_graph_version() -> String {
    "v18.0".to_string()
}

fn default_graph_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_send_timeout_secs() -> u64 {
    10
}

/// OpenAI Assistants API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. Falls back to `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Assistant to run. Falls back to `OPENAI_ASSISTANT_ID`.
    #[serde(default)]
    pub assistant_id: Option<String>,

    /// Model override applied to every run. `None` uses the assistant's model.
    #[serde(default)]
    pub model: Option<String>,

    /// Instructions override. `{name}` is replaced with the sender's profile name.
    #[serde(default)]
    pub instructions: Option<String>,

    /// API base URL.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Retries after the first attempt for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry backoff in milliseconds, doubled per attempt.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            assistant_id: None,
            model: None,
            instructions: None,
            base_url: default_openai_base_url(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Assistant run orchestration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Wait between run status polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum status polls per turn before giving up with a timeout.
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Maximum tool-output submissions per turn.
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,

    /// Reuse the stored thread for a sender. When false, every message
    /// starts a fresh thread.
    #[serde(default = "default_reuse_thread")]
    pub reuse_thread: bool,

    /// Reply sent when a turn fails.
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
            max_tool_rounds: default_max_tool_rounds(),
            reuse_thread: default_reuse_thread(),
            fallback_reply: default_fallback_reply(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_max_poll_attempts() -> u32 {
    240 // two minutes at the default interval
}

fn default_max_tool_rounds() -> u32 {
    8
}

fn default_reuse_thread() -> bool {
    true
}

fn default_fallback_reply() -> String {
    "Sorry, I couldn't process your message right now. Please try again in a moment."
        .to_string()
}

/// Duplicate webhook suppression configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DedupConfig {
    /// Record fingerprints in the SQLite database instead of process memory.
    #[serde(default)]
    pub persist: bool,

    /// Upper bound on in-memory fingerprints; oldest are evicted first.
    /// `None` keeps every fingerprint for the life of the process.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

/// Where thread mappings (and persisted fingerprints) live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; lost on restart.
    Memory,
    /// SQLite file at `storage.database_path`.
    #[default]
    Sqlite,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Backend for thread mappings.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("courier").join("courier.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("courier.db"))
        .to_string_lossy()
        .into_owned()
}

/// Text-to-speech configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechConfig {
    /// Synthesize every reply and keep the latest one at `output_path`.
    #[serde(default)]
    pub enabled: bool,

    /// TTS model (`tts-1` or `tts-1-hd`).
    #[serde(default = "default_speech_model")]
    pub model: String,

    /// Voice name.
    #[serde(default = "default_speech_voice")]
    pub voice: String,

    /// Playback speed, 0.25 to 4.0.
    #[serde(default = "default_speech_speed")]
    pub speed: f32,

    /// File the latest synthesized reply is written to and served from `/audio`.
    #[serde(default = "default_speech_output_path")]
    pub output_path: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_speech_model(),
            voice: default_speech_voice(),
            speed: default_speech_speed(),
            output_path: default_speech_output_path(),
        }
    }
}

fn default_speech_model() -> String {
    "tts-1".to_string()
}

fn default_speech_voice() -> String {
    "alloy".to_string()
}

fn default_speech_speed() -> f32 {
    1.4
}

fn default_speech_output_path() -> String {
    "openai-output.mp3".to_string()
}

/// Static shop information.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyConfig {
    /// Text returned by `GET /company-info`.
    #[serde(default = "default_company_info")]
    pub info: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            info: default_company_info(),
        }
    }
}

fn default_company_info() -> String {
    "Название магазина 'Магазин детской одежды'. Основан Абжановым Дидаром в 2024 году"
        .to_string()
}
