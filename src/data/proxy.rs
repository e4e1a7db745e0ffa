use reqwest::Client;
use serde_json::Value;

use crate::{
    data::air_quality::parse_reading,
    domain::{air_quality::AirQualityReading, location::Coordinate},
    error::DashboardError,
};

/// Dashboard-side client of the proxy's `/api/air-quality` route.
#[derive(Debug, Clone)]
pub struct ReadingsClient {
    client: Client,
    base_url: String,
}

impl ReadingsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("reqwest client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/air-quality", self.base_url)
    }

    pub async fn fetch(&self, coordinate: Coordinate) -> Result<AirQualityReading, DashboardError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|err| DashboardError::upstream("proxy request failed", err))?
            .error_for_status()
            .map_err(|err| DashboardError::upstream("proxy returned non-success status", err))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|err| DashboardError::upstream("proxy returned non-JSON body", err))?;

        parse_reading(payload)
    }
}
