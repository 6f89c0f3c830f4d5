//! Weather tool: geocoding plus Open-Meteo current conditions.

use crate::error::ToolError;
use crate::types::{FunctionDefinition, Tool, ToolDefinition};
use crate::weather::WeatherPipeline;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

/// Weather tool wrapping a [`WeatherPipeline`].
pub struct WeatherTool {
    pipeline: WeatherPipeline,
}

#[derive(Deserialize)]
struct WeatherArgs {
    city: String,
}

impl WeatherTool {
    pub fn new(pipeline: WeatherPipeline) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "get_weather".into(),
                description: "Get current weather for a city. Returns temperature (°C), wind speed (km/h) and a WMO weather code.".into(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "City name (e.g., 'Berlin', 'San Francisco', 'Tokyo')"
                        }
                    },
                    "required": ["city"]
                }),
            },
        }
    }

    fn name(&self) -> &str {
        "get_weather"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: WeatherArgs = serde_json::from_str(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let city = args.city.trim();
        if city.is_empty() {
            return Err(ToolError::InvalidArguments("Empty city".into()));
        }

        let outcome = self.pipeline.lookup(city).await?;
        if outcome.is_failure() {
            warn!(city = %city, "Weather lookup returned a failure outcome");
        }

        Ok(outcome.to_content()?)
    }
}
