//! Geocode → forecast pipeline and outcome rendering.

use super::{CurrentConditions, ForecastClient, Geocoder, Stage, WeatherError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Shape of a successful or contained-failure result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Structured record, or `{"error": ...}` on failure.
    #[default]
    Record,
    /// One human-readable sentence.
    Sentence,
}

/// What to do with upstream and malformed-response faults.
///
/// Not-found is always reported as an outcome regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Convert the fault into an outcome carrying its description.
    #[default]
    Contain,
    /// Return the fault to the caller.
    Propagate,
}

/// Current conditions for a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_celsius: Option<f64>,
    pub windspeed_kmh: Option<f64>,
    pub weather_code: Option<i64>,
}

/// One-key error record: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeatherOutcome {
    Report(WeatherReport),
    Error(ErrorRecord),
    Sentence(String),
    /// Failure explained as a sentence.
    Apology(String),
}

impl WeatherOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, WeatherOutcome::Error(_) | WeatherOutcome::Apology(_))
    }

    /// Text handed back to the model: JSON for records, the bare sentence otherwise.
    pub fn to_content(&self) -> Result<String, serde_json::Error> {
        match self {
            WeatherOutcome::Sentence(text) | WeatherOutcome::Apology(text) => Ok(text.clone()),
            other => serde_json::to_string(other),
        }
    }
}

/// Resolves a city, then fetches its current conditions.
///
/// Holds no per-call state; concurrent lookups are independent.
pub struct WeatherPipeline {
    geocoder: Arc<dyn Geocoder>,
    forecast: ForecastClient,
    mode: OutputMode,
    policy: FaultPolicy,
}

impl WeatherPipeline {
    /// Pipeline producing records and containing faults.
    pub fn new(geocoder: Arc<dyn Geocoder>, forecast: ForecastClient) -> Self {
        Self {
            geocoder,
            forecast,
            mode: OutputMode::default(),
            policy: FaultPolicy::default(),
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn policy(&self) -> FaultPolicy {
        self.policy
    }

    /// Look up current weather for `city`.
    ///
    /// Returns `Err` only under [`FaultPolicy::Propagate`], and never for
    /// a city the geocoder does not know.
    #[instrument(skip(self), fields(mode = ?self.mode, policy = ?self.policy))]
    pub async fn lookup(&self, city: &str) -> Result<WeatherOutcome, WeatherError> {
        match self.resolve(city).await {
            Ok(conditions) => Ok(self.render_report(city, conditions)),
            Err(err @ WeatherError::NotFound { .. }) => {
                debug!("No geocoding match");
                Ok(self.render_failure(city, &err))
            }
            Err(err) => match self.policy {
                FaultPolicy::Contain => {
                    warn!(stage = %err.stage(), error = %err, "Weather lookup failed");
                    Ok(self.render_failure(city, &err))
                }
                FaultPolicy::Propagate => Err(err),
            },
        }
    }

    async fn resolve(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let coordinate = self
            .geocoder
            .locate(city)
            .await?
            .ok_or_else(|| WeatherError::NotFound {
                city: city.to_string(),
            })?;

        self.forecast.current(coordinate).await
    }

    fn render_report(&self, city: &str, conditions: CurrentConditions) -> WeatherOutcome {
        let city = title_case(city);
        match self.mode {
            OutputMode::Record => WeatherOutcome::Report(WeatherReport {
                city,
                temperature_celsius: conditions.temperature,
                windspeed_kmh: conditions.windspeed,
                weather_code: conditions.weathercode,
            }),
            OutputMode::Sentence => WeatherOutcome::Sentence(format!(
                "The current temperature in {} is {}°C with wind speed {} km/h (weather code: {}).",
                city,
                format_measure(conditions.temperature),
                format_measure(conditions.windspeed),
                conditions
                    .weathercode
                    .map(|code| code.to_string())
                    .unwrap_or_else(|| "unknown".into()),
            )),
        }
    }

    fn render_failure(&self, city: &str, err: &WeatherError) -> WeatherOutcome {
        match self.mode {
            OutputMode::Record => WeatherOutcome::Error(ErrorRecord {
                error: err.to_string(),
            }),
            OutputMode::Sentence => WeatherOutcome::Apology(match err.stage() {
                Stage::Geocoding => format!("Sorry, I couldn't find location for {city}."),
                Stage::Forecasting => format!("Sorry, I couldn't fetch weather data for {city}."),
            }),
        }
    }
}

/// Whole numbers keep one decimal so `18` reads as `18.0`.
fn format_measure(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 => format!("{v:.1}"),
        Some(v) => v.to_string(),
        None => "unknown".into(),
    }
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("berlin"), "Berlin");
        assert_eq!(title_case("new YORK"), "New York");
        assert_eq!(title_case("rio-de-janeiro"), "Rio-De-Janeiro");
        assert_eq!(title_case("são paulo"), "São Paulo");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_format_measure() {
        assert_eq!(format_measure(Some(18.0)), "18.0");
        assert_eq!(format_measure(Some(-3.25)), "-3.25");
        assert_eq!(format_measure(None), "unknown");
    }

    #[test]
    fn test_record_serialization() {
        let outcome = WeatherOutcome::Report(WeatherReport {
            city: "Berlin".into(),
            temperature_celsius: Some(18.0),
            windspeed_kmh: None,
            weather_code: Some(2),
        });
        let value: serde_json::Value = serde_json::from_str(&outcome.to_content().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "city": "Berlin",
                "temperature_celsius": 18.0,
                "windspeed_kmh": null,
                "weather_code": 2
            })
        );
        assert!(!outcome.is_failure());
    }

    #[test]
    fn test_error_record_serialization() {
        let outcome = WeatherOutcome::Error(ErrorRecord {
            error: "boom".into(),
        });
        assert_eq!(outcome.to_content().unwrap(), r#"{"error":"boom"}"#);
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_sentence_content_is_bare_text() {
        let outcome = WeatherOutcome::Apology("Sorry.".into());
        assert_eq!(outcome.to_content().unwrap(), "Sorry.");
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_modes_from_config_values() {
        let mode: OutputMode = serde_json::from_str(r#""sentence""#).unwrap();
        assert_eq!(mode, OutputMode::Sentence);
        let policy: FaultPolicy = serde_json::from_str(r#""propagate""#).unwrap();
        assert_eq!(policy, FaultPolicy::Propagate);
    }
}
