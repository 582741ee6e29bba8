// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Speech adapter trait for text-to-speech generation.

use async_trait::async_trait;

use crate::error::CourierError;
use crate::traits::adapter::PluginAdapter;

/// Adapter that turns reply text into encoded audio.
#[async_trait]
pub trait SpeechAdapter: PluginAdapter {
    /// Synthesizes `text` and returns the encoded audio bytes (MP3).
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, CourierError>;
}
