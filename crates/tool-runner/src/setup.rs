//! Builds the tool list from configuration.

use crate::config::{Config, WeatherConfig};
use anyhow::{Context, Result};
use std::sync::Arc;
use tools::builtin::{default_registry, WeatherTool, WebSearchTool};
use tools::weather::{http_client, ForecastClient, WeatherPipeline};
use tools::{RunContext, TavilyClient, ToolRegistry};
use tracing::{info, warn};

/// Build the registry: `web_search` then `get_weather`, each only when enabled.
pub fn build_registry(config: &Config) -> Result<ToolRegistry> {
    let context = Arc::new(RunContext {
        max_search_results: config.context.max_search_results,
    });

    let web_search = match (&config.web_search.api_key, config.web_search.enabled) {
        (_, false) => None,
        (Some(key), true) => {
            match TavilyClient::with_base_url(key.clone(), &config.web_search.base_url) {
                Ok(client) => Some(WebSearchTool::new(Arc::new(client), context)),
                Err(e) => {
                    warn!(error = %e, "web_search misconfigured, skipping");
                    None
                }
            }
        }
        (None, true) => {
            warn!("web_search enabled but no API key configured, skipping");
            None
        }
    };

    let weather = if config.weather.enabled {
        Some(WeatherTool::new(weather_pipeline(&config.weather)?))
    } else {
        None
    };

    let registry = default_registry(web_search, weather);
    info!(tools = ?registry.list_enabled(), "Registered tools");
    Ok(registry)
}

fn weather_pipeline(config: &WeatherConfig) -> Result<WeatherPipeline> {
    let client = http_client(&config.user_agent, config.timeout)
        .context("Failed to create weather HTTP client")?;

    let geocoder = config
        .geocoder
        .build(client.clone(), config.geocoder_base_url());

    Ok(
        WeatherPipeline::new(geocoder, ForecastClient::new(client, &config.forecast_url))
            .with_mode(config.output)
            .with_policy(config.fault_policy),
    )
}
