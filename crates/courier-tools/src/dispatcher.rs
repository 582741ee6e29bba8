// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool lookup, argument parsing and schema rendering.

use courier_core::CourierError;
use serde_json::{Value, json};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use tracing::debug;

use crate::catalog::top_products;
use crate::weather::{self, WeatherArgs};

/// Every tool the assistant can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Tool {
    GetWeather,
    #[strum(serialize = "get_top_3_products")]
    GetTop3Products,
}

impl Tool {
    /// Name the assistant uses to request this tool.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::GetWeather => "Определите погоду в моем местоположении",
            Tool::GetTop3Products => "Топ 3 товара",
        }
    }

    /// JSON Schema of the tool's arguments.
    pub fn parameters_schema(self) -> Value {
        match self {
            Tool::GetWeather => json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "Город и штат, например, Сан-Франциско, Калифорния"
                    },
                    "unit": { "type": "string", "enum": ["c", "f"] }
                },
                "required": ["location"]
            }),
            Tool::GetTop3Products => json!({ "type": "object", "properties": {} }),
        }
    }

    /// Function-tool definition in the Assistants API format.
    pub fn definition(self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.parameters_schema(),
            }
        })
    }
}

/// Runs tool calls requested by the assistant.
#[derive(Debug, Clone, Default)]
pub struct ToolDispatcher;

impl ToolDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Definitions of every tool, sorted by name.
    pub fn tool_definitions(&self) -> Vec<Value> {
        let mut tools: Vec<Tool> = Tool::iter().collect();
        tools.sort_by_key(|t| t.name());
        tools.into_iter().map(Tool::definition).collect()
    }

    /// Execute the tool called `name` with JSON-encoded `arguments`.
    ///
    /// An empty argument string is treated as `{}`.
    pub async fn dispatch(&self, name: &str, arguments: &str) -> Result<String, CourierError> {
        let tool: Tool = name.parse().map_err(|_| CourierError::UnknownTool {
            name: name.to_string(),
        })?;
        let args = parse_arguments(tool, arguments)?;

        match tool {
            Tool::GetWeather => {
                let args: WeatherArgs = serde_json::from_value(args).unwrap_or_default();
                debug!(location = ?args.location, unit = ?args.unit, "get_weather");
                Ok(weather::REPORT.to_string())
            }
            Tool::GetTop3Products => {
                serde_json::to_string(top_products()).map_err(|e| CourierError::Internal(
                    format!("failed to serialize products: {e}"),
                ))
            }
        }
    }
}

fn parse_arguments(tool: Tool, raw: &str) -> Result<Value, CourierError> {
    if raw.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(raw).map_err(|e| CourierError::InvalidToolArguments {
        name: tool.name().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_parse() {
        for tool in Tool::iter() {
            assert_eq!(tool.name().parse::<Tool>().unwrap(), tool);
        }
        assert_eq!(Tool::GetTop3Products.name(), "get_top_3_products");
        assert_eq!(Tool::GetWeather.name(), "get_weather");
    }

    #[test]
    fn definitions_use_function_tool_shape() {
        let defs = ToolDispatcher::new().tool_definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0]["function"]["name"], "get_top_3_products");
        assert_eq!(defs[1]["function"]["name"], "get_weather");
        assert_eq!(defs[1]["type"], "function");
        assert_eq!(
            defs[1]["function"]["parameters"]["required"],
            json!(["location"])
        );
    }

    #[tokio::test]
    async fn weather_ignores_arguments() {
        let d = ToolDispatcher::new();
        let a = d
            .dispatch("get_weather", r#"{"location":"Astana","unit":"c"}"#)
            .await
            .unwrap();
        let b = d.dispatch("get_weather", r#"{"location":"Paris"}"#).await.unwrap();
        assert_eq!(a, weather::REPORT);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn empty_arguments_are_accepted() {
        let out = ToolDispatcher::new()
            .dispatch("get_top_3_products", "")
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);
        assert_eq!(parsed[0]["sku"], "ZZ1234");
    }

    #[tokio::test]
    async fn top_products_serialize_in_catalog_field_order() {
        let out = ToolDispatcher::new()
            .dispatch("get_top_3_products", "{}")
            .await
            .unwrap();
        let expected = concat!(
            r#"[{"id":1,"title":"Knitted Romper 'Marshmallow'","#,
            r#""description":"Cozy knitted romper for infants, perfect for cool weather. Made from soft wool, does not irritate the skin.","#,
            r#""sku":"ZZ1234"},"#,
            r#"{"id":2,"title":"Summer Dress 'Sunbeam'","#,
            r#""description":"Bright summer dress for girls with a floral and butterfly print. The light and airy material provides comfort in hot weather.","#,
            r#""sku":"SL4567"},"#,
            r#"{"id":3,"title":"Jacket 'Little Explorer'","#,
            r#""description":"Waterproof and windproof jacket for active outdoor walks. Features bright reflective elements for safety in the dark.","#,
            r#""sku":"EX8901"}]"#,
        );
        assert_eq!(out, expected);
    }

    #[tokio::test]
    async fn unknown_tool_fails() {
        let err = ToolDispatcher::new()
            .dispatch("get_stock_price", "{}")
            .await
            .unwrap_err();
        assert!(matches!(err, CourierError::UnknownTool { name } if name == "get_stock_price"));
    }

    #[tokio::test]
    async fn malformed_arguments_fail() {
        let err = ToolDispatcher::new()
            .dispatch("get_weather", "{location:")
            .await
            .unwrap_err();
        assert!(matches!(err, CourierError::InvalidToolArguments { name, .. } if name == "get_weather"));
    }
}
