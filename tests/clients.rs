mod common;

use std::time::Duration;

use common::{forecast_body, madrid};
use serde_json::json;
use weather_spark::data::{
    FetchError,
    forecast::ForecastClient,
    geocode::GeocodeClient,
    geolocate::{GeolocationError, Geolocator},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

#[tokio::test]
async fn forecast_request_carries_location_and_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "40.4168"))
        .and(query_param("longitude", "-3.7038"))
        .and(query_param("hourly", "temperature_2m,relative_humidity_2m,wind_speed_10m"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(48)))
        .expect(1)
        .mount(&server)
        .await;

    let client = ForecastClient::with_base_url(format!("{}/v1/forecast", server.uri()));
    let bundle = client.fetch(madrid()).await.expect("forecast");

    assert_eq!(bundle.location, madrid());
    assert_eq!(bundle.hourly.len(), 48);
    assert_eq!(bundle.hourly.day_slices().len(), 2);
    assert_eq!(bundle.utc_offset.local_minus_utc(), 3_600);
    assert_eq!(bundle.humidity_now, Some(71.0));
    assert_eq!(bundle.daily.len(), 2);
    assert_eq!(bundle.daily[1].temperature_min_c, Some(-1.5));
    let current = bundle.current.expect("current");
    assert_eq!(current.weather_code, Some(2));
}

#[tokio::test]
async fn mismatched_hourly_arrays_are_rejected() {
    let server = MockServer::start().await;
    let mut body = forecast_body(3);
    body["hourly"]["temperature_2m"] = json!([1.0, 2.0]);
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = ForecastClient::with_base_url(server.uri());
    let err = client.fetch(madrid()).await.expect_err("mismatch");
    assert!(matches!(err, FetchError::Malformed(_)), "{err}");
    assert!(err.to_string().contains("3 timestamps but 2 temperatures"));
}

#[tokio::test]
async fn forecast_server_error_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ForecastClient::with_base_url(server.uri());
    let err = client.fetch(madrid()).await.expect_err("server error");
    assert!(matches!(err, FetchError::Status(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn forecast_without_blocks_is_empty_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "utc_offset_seconds": 0 })))
        .mount(&server)
        .await;

    let client = ForecastClient::with_base_url(server.uri());
    let bundle = client.fetch(madrid()).await.expect("empty forecast");
    assert!(bundle.current.is_none());
    assert!(bundle.hourly.is_empty());
    assert!(bundle.daily.is_empty());
}

#[tokio::test]
async fn geocode_returns_candidates_in_provider_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Springfield"))
        .and(query_param("count", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "name": "Springfield",
                    "latitude": 39.799,
                    "longitude": -89.644,
                    "country": "United States",
                    "admin1": "Illinois",
                    "timezone": "America/Chicago"
                },
                {
                    "name": "Springfield",
                    "latitude": 44.046,
                    "longitude": -123.022,
                    "country": "United States",
                    "admin1": "Oregon"
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = GeocodeClient::with_base_url(format!("{}/v1/search", server.uri()));
    let names: Vec<String> = client
        .search("  Springfield ")
        .await
        .iter()
        .map(|location| location.display_name())
        .collect();
    assert_eq!(
        names,
        [
            "Springfield, Illinois, United States",
            "Springfield, Oregon, United States"
        ]
    );
}

#[tokio::test]
async fn geocode_without_results_or_on_error_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("name", "Atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generationtime_ms": 0.2 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("name", "Broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = GeocodeClient::with_base_url(server.uri());
    assert!(client.search("Atlantis").await.is_empty());
    assert!(client.search("Broken").await.is_empty());
}

#[tokio::test]
async fn geolocation_reads_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "latitude": 13.0827,
            "longitude": 80.2707,
            "timezone": "Asia/Kolkata"
        })))
        .mount(&server)
        .await;

    let locator = Geolocator::new(Some(server.uri()), Duration::from_secs(2));
    let location = locator.locate().await.expect("position");
    assert_eq!(location.name, "Lat 13.083, Lon 80.271");
    assert_eq!((location.latitude, location.longitude), (13.0827, 80.2707));
}

#[tokio::test]
async fn geolocation_forbidden_is_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let locator = Geolocator::new(Some(server.uri()), Duration::from_secs(2));
    assert_eq!(locator.locate().await, Err(GeolocationError::Denied));
}

#[tokio::test]
async fn geolocation_without_coordinates_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": true })))
        .mount(&server)
        .await;

    let locator = Geolocator::new(Some(server.uri()), Duration::from_secs(2));
    assert!(matches!(
        locator.locate().await,
        Err(GeolocationError::Unavailable(_))
    ));
}

#[tokio::test]
async fn slow_geolocation_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "latitude": 1.0, "longitude": 2.0 }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let locator = Geolocator::new(Some(server.uri()), Duration::from_secs(1));
    assert_eq!(locator.locate().await, Err(GeolocationError::Timeout));
}

#[tokio::test]
async fn fixed_position_beats_the_network_and_disabled_beats_both() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let fixed = Geolocator::new(Some(server.uri()), Duration::from_secs(1))
        .with_fixed_position(Some((-33.87, 151.21)));
    let location = fixed.locate().await.expect("fixed");
    assert_eq!(location.name, "Lat -33.870, Lon 151.210");

    let disabled = fixed.disabled();
    assert_eq!(disabled.locate().await, Err(GeolocationError::Unsupported));
}
