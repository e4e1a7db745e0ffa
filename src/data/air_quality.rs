use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    domain::{
        air_quality::{AirQualityReading, CurrentReadings, HourlyReadings},
        location::Coordinate,
    },
    error::DashboardError,
};

pub const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

const CURRENT_FIELDS: &str = "european_aqi,us_aqi,pm10,pm2_5,carbon_monoxide,nitrogen_dioxide,sulphur_dioxide,ozone";
const HOURLY_FIELDS: &str = "pm10,pm2_5,ozone";
const FORECAST_DAYS: &str = "3";

/// Client for the upstream air-quality provider. Used by the proxy route.
#[derive(Debug, Clone)]
pub struct AirQualityClient {
    client: Client,
    base_url: String,
}

impl Default for AirQualityClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AirQualityClient {
    pub fn new() -> Self {
        Self::with_base_url(AIR_QUALITY_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
        }
    }

    /// Fetches the provider payload and returns it untouched.
    pub async fn fetch_raw(&self, coordinate: Coordinate) -> Result<Value, DashboardError> {
        debug!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "requesting air quality from provider"
        );
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|err| DashboardError::upstream("air quality request failed", err))?
            .error_for_status()
            .map_err(|err| {
                DashboardError::upstream("air quality request returned non-success status", err)
            })?;

        response
            .json::<Value>()
            .await
            .map_err(|err| DashboardError::upstream("failed to decode air quality payload", err))
    }
}

/// Turns a provider payload (as relayed by the proxy) into a reading.
pub fn parse_reading(payload: Value) -> Result<AirQualityReading, DashboardError> {
    let payload: AirQualityResponse = serde_json::from_value(payload)
        .map_err(|err| DashboardError::upstream("failed to parse air quality payload", err))?;

    let hourly = HourlyReadings::from_columns(
        &payload.hourly.time,
        &payload.hourly.pm10,
        &payload.hourly.pm2_5,
        &payload.hourly.ozone,
    )?;

    let current = payload.current;
    Ok(AirQualityReading {
        current: CurrentReadings {
            european_index: current.european_aqi,
            us_index: current.us_aqi,
            pm10: current.pm10,
            pm2_5: current.pm2_5,
            carbon_monoxide: current.carbon_monoxide,
            nitrogen_dioxide: current.nitrogen_dioxide,
            sulphur_dioxide: current.sulphur_dioxide,
            ozone: current.ozone,
        },
        hourly,
        fetched_at: Utc::now(),
    })
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: CurrentBlock,
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    european_aqi: Option<f64>,
    us_aqi: Option<f64>,
    pm10: Option<f64>,
    pm2_5: Option<f64>,
    carbon_monoxide: Option<f64>,
    nitrogen_dioxide: Option<f64>,
    sulphur_dioxide: Option<f64>,
    ozone: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    #[serde(default)]
    pm10: Vec<Option<f64>>,
    #[serde(default)]
    pm2_5: Vec<Option<f64>>,
    #[serde(default)]
    ozone: Vec<Option<f64>>,
}
