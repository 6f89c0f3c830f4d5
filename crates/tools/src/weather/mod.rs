//! Two-step weather lookup: geocode a city name, then fetch current conditions.

mod error;
mod forecast;
mod geocode;
mod pipeline;

pub use error::{FaultKind, Stage, WeatherError};
pub use forecast::{CurrentConditions, ForecastClient, OPEN_METEO_FORECAST_URL};
pub use geocode::{
    Geocoder, GeocoderKind, NominatimGeocoder, OpenMeteoGeocoder, NOMINATIM_URL,
    OPEN_METEO_GEOCODING_URL,
};
pub use pipeline::{
    title_case, ErrorRecord, FaultPolicy, OutputMode, WeatherOutcome, WeatherPipeline,
    WeatherReport,
};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Latitude/longitude pair taken from the first geocoding match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Build the HTTP client shared by the geocoder and forecast client.
///
/// Nominatim rejects requests without a User-Agent, so one is always set.
pub fn http_client(user_agent: &str, timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(user_agent);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Send a GET and decode a JSON body, classifying every failure by stage.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    stage: Stage,
) -> Result<T, WeatherError> {
    let response = request
        .send()
        .await
        .map_err(|source| WeatherError::Transport { stage, source })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| WeatherError::Transport { stage, source })?;

    if !status.is_success() {
        return Err(WeatherError::Status {
            stage,
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| WeatherError::malformed(stage, e.to_string()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
