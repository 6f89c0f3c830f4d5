//! Runner configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tools::weather::{FaultPolicy, GeocoderKind, OutputMode, OPEN_METEO_FORECAST_URL};

/// Prefix for all configuration variables, e.g. `AGENT_TOOLS_WEATHER__GEOCODER`.
const ENV_PREFIX: &str = "AGENT_TOOLS";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Per-run settings handed to the tools
    #[serde(default)]
    pub context: ContextConfig,

    /// Web search configuration
    #[serde(default)]
    pub web_search: WebSearchConfig,

    /// Weather tool configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Executor limits
    #[serde(default)]
    pub executor: ExecutorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextConfig {
    /// Maximum results requested from the search backend
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSearchConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Tavily API key; falls back to `TAVILY_API_KEY`
    pub api_key: Option<String>,

    #[serde(default = "default_tavily_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub geocoder: GeocoderKind,

    /// Overrides the geocoder's public endpoint
    #[serde(default)]
    pub geocoder_url: Option<String>,

    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default)]
    pub output: OutputMode,

    #[serde(default)]
    pub fault_policy: FaultPolicy,

    /// Per-request timeout; none by default
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl WeatherConfig {
    pub fn geocoder_base_url(&self) -> &str {
        self.geocoder_url
            .as_deref()
            .unwrap_or_else(|| self.geocoder.default_base_url())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutorConfig {
    /// Wall-clock limit for a single tool call
    #[serde(default = "default_executor_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_max_response_len")]
    pub max_response_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

// Default implementations
impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_search_results: default_max_search_results(),
        }
    }
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            api_key: None,
            base_url: default_tavily_url(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            geocoder: GeocoderKind::default(),
            geocoder_url: None,
            forecast_url: default_forecast_url(),
            output: OutputMode::default(),
            fault_policy: FaultPolicy::default(),
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: default_executor_timeout(),
            max_response_len: default_max_response_len(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_max_search_results() -> usize {
    10
}

fn default_tavily_url() -> String {
    tools::search::TAVILY_URL.into()
}

fn default_forecast_url() -> String {
    OPEN_METEO_FORECAST_URL.into()
}

fn default_user_agent() -> String {
    concat!("agent-tools/", env!("CARGO_PKG_VERSION")).into()
}

fn default_executor_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_response_len() -> usize {
    4000
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mut config = Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))?;

        if config.web_search.api_key.is_none() {
            config.web_search.api_key = std::env::var("TAVILY_API_KEY").ok();
        }

        Ok(config)
    }

    fn from_environment(environment: config::Environment) -> Result<Self> {
        config::Config::builder()
            .add_source(
                environment
                    .prefix_separator("_")
                    .separator("__")
                    // Keep API keys and URLs as strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Config {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_environment(config::Environment::with_prefix(ENV_PREFIX).source(Some(source)))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&[]);

        assert_eq!(config.context.max_search_results, 10);
        assert!(config.web_search.enabled);
        assert!(config.web_search.api_key.is_none());
        assert_eq!(config.weather.geocoder, GeocoderKind::Nominatim);
        assert_eq!(config.weather.geocoder_base_url(), tools::weather::NOMINATIM_URL);
        assert_eq!(config.weather.output, OutputMode::Record);
        assert_eq!(config.weather.fault_policy, FaultPolicy::Contain);
        assert_eq!(config.weather.timeout, None);
        assert_eq!(config.executor.timeout, Duration::from_secs(10));
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = from_vars(&[
            ("AGENT_TOOLS_CONTEXT__MAX_SEARCH_RESULTS", "3"),
            ("AGENT_TOOLS_WEB_SEARCH__API_KEY", "tvly-123"),
            ("AGENT_TOOLS_WEATHER__GEOCODER", "open_meteo"),
            ("AGENT_TOOLS_WEATHER__OUTPUT", "sentence"),
            ("AGENT_TOOLS_WEATHER__FAULT_POLICY", "propagate"),
            ("AGENT_TOOLS_WEATHER__TIMEOUT", "5s"),
            ("AGENT_TOOLS_EXECUTOR__TIMEOUT", "30s"),
            ("AGENT_TOOLS_LOGGING__FORMAT", "json"),
        ]);

        assert_eq!(config.context.max_search_results, 3);
        assert_eq!(config.web_search.api_key.as_deref(), Some("tvly-123"));
        assert_eq!(config.weather.geocoder, GeocoderKind::OpenMeteo);
        assert_eq!(
            config.weather.geocoder_base_url(),
            tools::weather::OPEN_METEO_GEOCODING_URL
        );
        assert_eq!(config.weather.output, OutputMode::Sentence);
        assert_eq!(config.weather.fault_policy, FaultPolicy::Propagate);
        assert_eq!(config.weather.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.executor.timeout, Duration::from_secs(30));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_geocoder_url_override() {
        let config = from_vars(&[("AGENT_TOOLS_WEATHER__GEOCODER_URL", "http://localhost:8080")]);
        assert_eq!(config.weather.geocoder_base_url(), "http://localhost:8080");
    }
}
