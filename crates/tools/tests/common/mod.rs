//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use tools::weather::{
    http_client, ForecastClient, GeocoderKind, WeatherPipeline,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BERLIN_LAT: &str = "52.52";
pub const BERLIN_LON: &str = "13.405";

/// Build a pipeline whose geocoder and forecast client point at mock servers.
pub fn test_pipeline(kind: GeocoderKind, geocoder: &str, forecast: &str) -> WeatherPipeline {
    let client = http_client("agent-tools-test/0.1", None).unwrap();
    WeatherPipeline::new(
        kind.build(client.clone(), geocoder),
        ForecastClient::new(client, forecast),
    )
}

pub fn nominatim_pipeline(geocoder: &MockServer, forecast: &MockServer) -> WeatherPipeline {
    test_pipeline(GeocoderKind::Nominatim, &geocoder.uri(), &forecast.uri())
}

pub fn berlin_forecast() -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.405,
        "current_weather": {
            "temperature": 18.0,
            "windspeed": 10.0,
            "winddirection": 270.0,
            "weathercode": 2,
            "time": "2024-06-01T12:00"
        }
    })
}

/// Nominatim answers with a single Berlin match.
pub async fn mount_berlin_geocode(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"lat": 52.52, "lon": 13.405, "display_name": "Berlin, Deutschland"}
        ])))
        .mount(server)
        .await;
}

/// Forecast mock for Berlin's coordinates that must be hit `times` times.
pub async fn mount_berlin_forecast(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", BERLIN_LAT))
        .and(query_param("longitude", BERLIN_LON))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(berlin_forecast()))
        .expect(times)
        .mount(server)
        .await;
}

/// Forecast mock that fails the test if any request reaches it.
pub async fn forbid_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(berlin_forecast()))
        .expect(0)
        .named("forecast must not be called")
        .mount(server)
        .await;
}

pub fn shared(pipeline: WeatherPipeline) -> Arc<WeatherPipeline> {
    Arc::new(pipeline)
}
