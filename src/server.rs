//! HTTP backend: a health check and a pass-through air quality route.

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument, warn};

use crate::{
    config::ServerConfig, data::air_quality::AirQualityClient, domain::location::Coordinate,
    error::DashboardError,
};

#[derive(Debug, Clone)]
pub struct ServerState {
    provider: AirQualityClient,
}

impl ServerState {
    pub fn new(provider: AirQualityClient) -> Self {
        Self { provider }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/air-quality", get(air_quality))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves the router on a background task.
pub async fn spawn(state: ServerState, addr: SocketAddr) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener
        .local_addr()
        .context("failed to read bound address")?;
    let app = router(state);
    let handle = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            warn!(error = %err, "proxy server stopped");
        }
    });
    Ok((local, handle))
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = ServerState::new(AirQualityClient::with_base_url(config.provider_url.clone()));
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, provider = %config.provider_url, "air quality proxy listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("proxy server failed")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    message: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        message: "Air quality proxy is running",
    })
}

#[derive(Debug, Deserialize)]
struct CoordinateQuery {
    lat: Option<String>,
    lon: Option<String>,
}

impl CoordinateQuery {
    fn coordinate(&self) -> Result<Coordinate, DashboardError> {
        let lat = required(self.lat.as_deref(), "lat")?;
        let lon = required(self.lon.as_deref(), "lon")?;
        Ok(Coordinate::new(parse_degrees(lat)?, parse_degrees(lon)?))
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, DashboardError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(DashboardError::MissingParameter(name))
}

fn parse_degrees(raw: &str) -> Result<f64, DashboardError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DashboardError::InvalidInput(format!("not a number: {raw:?}")))
}

#[instrument(skip(state))]
async fn air_quality(
    State(state): State<ServerState>,
    Query(query): Query<CoordinateQuery>,
) -> Result<Json<Value>, ApiError> {
    let coordinate = query.coordinate()?;
    let body = state.provider.fetch_raw(coordinate).await.inspect_err(|err| {
        warn!(error = %err, "upstream air quality request failed");
    })?;
    Ok(Json(body))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Debug)]
pub struct ApiError(DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self.0 {
            DashboardError::MissingParameter(_) => (
                StatusCode::BAD_REQUEST,
                "Latitude and longitude are required",
            ),
            DashboardError::InvalidInput(_) => (
                StatusCode::BAD_REQUEST,
                "Latitude and longitude must be numbers",
            ),
            DashboardError::NotFound(_)
            | DashboardError::Upstream { .. }
            | DashboardError::SeriesLengthMismatch { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch air quality data",
            ),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}
