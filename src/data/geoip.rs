use reqwest::Client;
use serde::Deserialize;

use crate::{domain::location::Coordinate, error::DashboardError};

pub const GEOIP_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Coarse geolocation from the caller's public IP address.
#[derive(Debug, Clone)]
pub struct GeoIpClient {
    client: Client,
    url: String,
}

impl Default for GeoIpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoIpClient {
    pub fn new() -> Self {
        Self::with_url(GEOIP_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(5))
                .build()
                .expect("reqwest client"),
            url: url.into(),
        }
    }

    pub async fn detect(&self) -> Result<Coordinate, DashboardError> {
        let response: IpApiResponse = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| DashboardError::upstream("geolocation request failed", err))?
            .error_for_status()
            .map_err(|err| {
                DashboardError::upstream("geolocation request returned non-success status", err)
            })?
            .json()
            .await
            .map_err(|err| DashboardError::upstream("failed to decode geolocation response", err))?;

        match (response.latitude, response.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinate::new(latitude, longitude)),
            _ => Err(DashboardError::NotFound("current position".to_string())),
        }
    }
}
