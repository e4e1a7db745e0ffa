mod common;

use common::{PROVIDER_PATH, provider_payload, spawn_proxy};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

async fn get(url: String) -> (u16, Value) {
    let response = reqwest::get(url).await.expect("request proxy");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn health_reports_ok() {
    let upstream = MockServer::start().await;
    let addr = spawn_proxy(format!("{}{PROVIDER_PATH}", upstream.uri())).await;

    let (status, body) = get(format!("http://{addr}/api/health")).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "status": "ok", "message": "Air quality proxy is running" })
    );
}

#[tokio::test]
async fn relays_provider_payload_verbatim() {
    let upstream = MockServer::start().await;
    let payload = provider_payload(42.0);
    Mock::given(method("GET"))
        .and(path(PROVIDER_PATH))
        .and(query_param("latitude", "59.3293"))
        .and(query_param("longitude", "18.0686"))
        .and(query_param("hourly", "pm10,pm2_5,ozone"))
        .and(query_param("forecast_days", "3"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&upstream)
        .await;
    let addr = spawn_proxy(format!("{}{PROVIDER_PATH}", upstream.uri())).await;

    let (status, body) = get(format!(
        "http://{addr}/api/air-quality?lat=59.3293&lon=18.0686"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, payload);
}

#[tokio::test]
async fn missing_longitude_is_a_bad_request() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_payload(42.0)))
        .expect(0)
        .mount(&upstream)
        .await;
    let addr = spawn_proxy(format!("{}{PROVIDER_PATH}", upstream.uri())).await;

    let (status, body) = get(format!("http://{addr}/api/air-quality?lat=59.3")).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Latitude and longitude are required" }));

    let (status, _) = get(format!("http://{addr}/api/air-quality")).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn non_numeric_coordinates_are_rejected() {
    let upstream = MockServer::start().await;
    let addr = spawn_proxy(format!("{}{PROVIDER_PATH}", upstream.uri())).await;

    let (status, body) = get(format!(
        "http://{addr}/api/air-quality?lat=north&lon=18.0"
    ))
    .await;
    assert_eq!(status, 400);
    assert_eq!(
        body,
        json!({ "error": "Latitude and longitude must be numbers" })
    );
}

#[tokio::test]
async fn upstream_failure_maps_to_generic_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROVIDER_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&upstream)
        .await;
    let addr = spawn_proxy(format!("{}{PROVIDER_PATH}", upstream.uri())).await;

    let (status, body) = get(format!("http://{addr}/api/air-quality?lat=1&lon=2")).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Failed to fetch air quality data" }));
}

#[tokio::test]
async fn undecodable_upstream_body_maps_to_generic_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROVIDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&upstream)
        .await;
    let addr = spawn_proxy(format!("{}{PROVIDER_PATH}", upstream.uri())).await;

    let (status, body) = get(format!("http://{addr}/api/air-quality?lat=1&lon=2")).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to fetch air quality data");
}
