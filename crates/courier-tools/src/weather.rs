// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::Deserialize;

/// Temperature unit requested by the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    C,
    F,
}

/// Arguments the assistant sends with `get_weather`.
///
/// Parsed for logging only; the report does not depend on them.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherArgs {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub unit: Option<Unit>,
}

/// Fixed weather report returned for every location.
pub const REPORT: &str = "в Астане сейчас 77 градусов по цельси";
