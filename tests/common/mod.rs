#![allow(dead_code)]

use aqi_dashboard::{
    app::pipeline::Services,
    config::{DashboardConfig, Endpoints, InsightConfig, ProxyTarget, StartLocation},
    data::air_quality::AirQualityClient,
    server::{self, ServerState},
};
use serde_json::{Value, json};
use std::net::{Ipv4Addr, SocketAddr};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const PROVIDER_PATH: &str = "/v1/air-quality";
pub const SEARCH_PATH: &str = "/v1/search";
pub const REVERSE_PATH: &str = "/data/reverse-geocode-client";
pub const GEOIP_PATH: &str = "/json/";
pub const INSIGHT_PATH: &str = "/v1beta/models/gemini-test:generateContent";

pub fn provider_payload(us_aqi: f64) -> Value {
    let time: Vec<String> = (0..72)
        .map(|idx| format!("2026-02-{:02}T{:02}:00", 12 + idx / 24, idx % 24))
        .collect();
    let pm10: Vec<f64> = (0..72).map(|idx| 15.0 + f64::from(idx % 10)).collect();
    let pm2_5: Vec<f64> = (0..72).map(|idx| 6.0 + f64::from(idx % 12)).collect();
    let ozone: Vec<f64> = (0..72).map(|idx| 55.0 + f64::from(idx % 8)).collect();

    json!({
        "latitude": 59.33,
        "longitude": 18.07,
        "current_units": { "pm2_5": "μg/m³", "carbon_monoxide": "μg/m³" },
        "current": {
            "time": "2026-02-12T10:00",
            "interval": 3600,
            "european_aqi": 28,
            "us_aqi": us_aqi,
            "pm10": 18.4,
            "pm2_5": 9.7,
            "carbon_monoxide": 800.0,
            "nitrogen_dioxide": 14.2,
            "sulphur_dioxide": 2.1,
            "ozone": 71.0
        },
        "hourly": {
            "time": time,
            "pm10": pm10,
            "pm2_5": pm2_5,
            "ozone": ozone
        }
    })
}

pub async fn mount_provider(server: &MockServer, payload: Value) {
    Mock::given(method("GET"))
        .and(path(PROVIDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(server)
        .await;
}

pub async fn mount_search(server: &MockServer, name: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn search_result(name: &str, latitude: f64, longitude: f64, country: &str) -> Value {
    json!({
        "results": [{
            "name": name,
            "latitude": latitude,
            "longitude": longitude,
            "country": country,
            "country_code": "XX",
            "admin1": name,
            "timezone": "UTC",
            "population": 1_000_000
        }]
    })
}

pub async fn mount_insight(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(INSIGHT_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })))
        .mount(server)
        .await;
}

pub fn insight_config(server: &MockServer) -> InsightConfig {
    InsightConfig {
        api_key: Some("test-key".to_string()),
        model: "gemini-test".to_string(),
        base_url: server.uri(),
    }
}

/// Dashboard config with every provider pointed at `server`.
pub fn mocked_config(server: &MockServer, start: StartLocation) -> DashboardConfig {
    DashboardConfig {
        proxy: ProxyTarget::Embedded {
            provider_url: format!("{}{PROVIDER_PATH}", server.uri()),
        },
        endpoints: Endpoints {
            geocode_url: format!("{}{SEARCH_PATH}", server.uri()),
            reverse_geocode_url: format!("{}{REVERSE_PATH}", server.uri()),
            geoip_url: format!("{}{GEOIP_PATH}", server.uri()),
        },
        insight: insight_config(server),
        start,
        trend_hours: 24,
        refresh_interval_secs: 0,
    }
}

pub async fn mocked_services(config: &DashboardConfig) -> Services {
    let (proxy_url, _task) = aqi_dashboard::start_proxy(&config.proxy)
        .await
        .expect("proxy starts");
    Services::new(config, &proxy_url)
}

/// Starts the proxy router against `provider_url` on a loopback port.
pub async fn spawn_proxy(provider_url: String) -> SocketAddr {
    let state = ServerState::new(AirQualityClient::with_base_url(provider_url));
    let (addr, _task) = server::spawn(state, SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .expect("proxy binds");
    addr
}
