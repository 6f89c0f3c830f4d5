//! Open-Meteo current-conditions client.

use super::{get_json, GeoCoordinate, Stage, WeatherError};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument};

pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com";

/// Present-moment conditions. Fields the service omits stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_code")]
    pub weathercode: Option<i64>,
}

/// Accepts `2` and `2.0` alike; anything non-integral reads as absent.
fn lenient_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_i64().or_else(|| {
            v.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        })
    }))
}

#[derive(Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current_weather: Option<CurrentConditions>,
}

/// Client for the `/v1/forecast` endpoint.
#[derive(Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch current conditions at `coordinate`.
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    pub async fn current(&self, coordinate: GeoCoordinate) -> Result<CurrentConditions, WeatherError> {
        debug!("Fetching current conditions");

        let request = self
            .client
            .get(format!("{}/v1/forecast", self.base_url))
            .query(&[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ]);

        let response: ForecastResponse = get_json(request, Stage::Forecasting).await?;
        Ok(response.current_weather.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_absent() {
        let response: ForecastResponse =
            serde_json::from_str(r#"{"current_weather": {"temperature": 4.5}}"#).unwrap();
        let current = response.current_weather.unwrap();
        assert_eq!(current.temperature, Some(4.5));
        assert_eq!(current.windspeed, None);
        assert_eq!(current.weathercode, None);
    }

    #[test]
    fn test_float_weather_code_accepted() {
        let response: ForecastResponse = serde_json::from_str(
            r#"{"current_weather": {"temperature": 18.0, "windspeed": 10.0, "weathercode": 2.0}}"#,
        )
        .unwrap();
        assert_eq!(response.current_weather.unwrap().weathercode, Some(2));

        let current: CurrentConditions =
            serde_json::from_str(r#"{"weathercode": 2.5}"#).unwrap();
        assert_eq!(current.weathercode, None);

        let current: CurrentConditions =
            serde_json::from_str(r#"{"weathercode": "cloudy"}"#).unwrap();
        assert_eq!(current.weathercode, None);
    }

    #[test]
    fn test_missing_object_is_absent() {
        let response: ForecastResponse = serde_json::from_str(r#"{"latitude": 1.0}"#).unwrap();
        assert_eq!(response.current_weather.unwrap_or_default(), CurrentConditions::default());
    }
}
