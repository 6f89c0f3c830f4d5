//! Geocoding providers resolving a place name to coordinates.

use super::{get_json, GeoCoordinate, Stage, WeatherError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const OPEN_METEO_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";

/// Resolves a city name to the coordinates of its first match.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns `Ok(None)` when the provider has no candidates.
    async fn locate(&self, city: &str) -> Result<Option<GeoCoordinate>, WeatherError>;
}

/// Supported geocoding providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocoderKind {
    #[default]
    Nominatim,
    OpenMeteo,
}

impl GeocoderKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            GeocoderKind::Nominatim => NOMINATIM_URL,
            GeocoderKind::OpenMeteo => OPEN_METEO_GEOCODING_URL,
        }
    }

    pub fn build(&self, client: Client, base_url: impl Into<String>) -> Arc<dyn Geocoder> {
        match self {
            GeocoderKind::Nominatim => Arc::new(NominatimGeocoder::new(client, base_url)),
            GeocoderKind::OpenMeteo => Arc::new(OpenMeteoGeocoder::new(client, base_url)),
        }
    }
}

/// Nominatim reports coordinates as strings; some mirrors use numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn parse(&self) -> Option<f64> {
        match self {
            Degrees::Number(value) => Some(*value),
            Degrees::Text(text) => text.trim().parse().ok(),
        }
    }
}

fn coordinate(value: Option<Degrees>, field: &str) -> Result<f64, WeatherError> {
    let value = value.ok_or_else(|| {
        WeatherError::malformed(Stage::Geocoding, format!("first match has no '{field}' field"))
    })?;
    value.parse().ok_or_else(|| {
        WeatherError::malformed(Stage::Geocoding, format!("'{field}' is not a number"))
    })
}

/// OpenStreetMap Nominatim search API.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct NominatimPlace {
    lat: Option<Degrees>,
    lon: Option<Degrees>,
}

impl NominatimGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn locate(&self, city: &str) -> Result<Option<GeoCoordinate>, WeatherError> {
        debug!(provider = "nominatim", "Geocoding location");

        let request = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", city), ("format", "json"), ("limit", "1")]);

        let places: Vec<NominatimPlace> = get_json(request, Stage::Geocoding).await?;

        match places.into_iter().next() {
            Some(place) => Ok(Some(GeoCoordinate {
                latitude: coordinate(place.lat, "lat")?,
                longitude: coordinate(place.lon, "lon")?,
            })),
            None => Ok(None),
        }
    }
}

/// Open-Meteo geocoding API (free, no API key required).
pub struct OpenMeteoGeocoder {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct OpenMeteoResponse {
    results: Option<Vec<OpenMeteoPlace>>,
}

#[derive(Deserialize)]
struct OpenMeteoPlace {
    latitude: Option<Degrees>,
    longitude: Option<Degrees>,
}

impl OpenMeteoGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    #[instrument(skip(self))]
    async fn locate(&self, city: &str) -> Result<Option<GeoCoordinate>, WeatherError> {
        debug!(provider = "open_meteo", "Geocoding location");

        let request = self
            .client
            .get(format!("{}/v1/search", self.base_url))
            .query(&[("name", city), ("count", "1"), ("format", "json")]);

        let response: OpenMeteoResponse = get_json(request, Stage::Geocoding).await?;

        match response.results.and_then(|r| r.into_iter().next()) {
            Some(place) => Ok(Some(GeoCoordinate {
                latitude: coordinate(place.latitude, "latitude")?,
                longitude: coordinate(place.longitude, "longitude")?,
            })),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_accepts_text_and_numbers() {
        let text: Degrees = serde_json::from_str(r#""52.5170365""#).unwrap();
        assert_eq!(text.parse(), Some(52.5170365));

        let number: Degrees = serde_json::from_str("13.405").unwrap();
        assert_eq!(number.parse(), Some(13.405));

        let garbage: Degrees = serde_json::from_str(r#""north""#).unwrap();
        assert_eq!(garbage.parse(), None);
    }

    #[test]
    fn test_missing_coordinate_is_malformed() {
        let err = coordinate(None, "lat").unwrap_err();
        assert!(matches!(
            err,
            WeatherError::Malformed {
                stage: Stage::Geocoding,
                ..
            }
        ));
        assert!(err.to_string().contains("'lat'"));
    }

    #[test]
    fn test_geocoder_kind_from_config_value() {
        let kind: GeocoderKind = serde_json::from_str(r#""open_meteo""#).unwrap();
        assert_eq!(kind, GeocoderKind::OpenMeteo);
        assert_eq!(kind.default_base_url(), OPEN_METEO_GEOCODING_URL);
        assert_eq!(GeocoderKind::default(), GeocoderKind::Nominatim);
    }
}
