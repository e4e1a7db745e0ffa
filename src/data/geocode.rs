use reqwest::Client;
use serde::Deserialize;

use crate::{
    domain::location::{Coordinate, GeocodeResolution, Location},
    error::DashboardError,
};

pub const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const REVERSE_GEOCODE_URL: &str =
    "https://api.bigdatacloud.net/data/reverse-geocode-client";

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    search_url: String,
    reverse_url: String,
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeClient {
    pub fn new() -> Self {
        Self::with_base_urls(GEOCODE_URL, REVERSE_GEOCODE_URL)
    }

    pub fn with_base_urls(search_url: impl Into<String>, reverse_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(8))
                .build()
                .expect("reqwest client"),
            search_url: search_url.into(),
            reverse_url: reverse_url.into(),
        }
    }

    /// Forward geocoding. The provider's first result wins.
    pub async fn resolve(&self, city: &str) -> Result<GeocodeResolution, DashboardError> {
        let query = city.trim();
        if query.is_empty() {
            return Err(DashboardError::InvalidInput(
                "city name must not be empty".to_string(),
            ));
        }

        let payload: GeocodeResponse = self
            .client
            .get(&self.search_url)
            .query(&[
                ("name", query),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|err| DashboardError::upstream("geocoding request failed", err))?
            .error_for_status()
            .map_err(|err| {
                DashboardError::upstream("geocoding request returned non-success status", err)
            })?
            .json()
            .await
            .map_err(|err| DashboardError::upstream("failed to decode geocoding response", err))?;

        let Some(first) = payload.results.and_then(|results| results.into_iter().next()) else {
            return Ok(GeocodeResolution::NotFound(query.to_string()));
        };

        Ok(GeocodeResolution::Selected(Location {
            name: first.name,
            coordinate: Coordinate::new(first.latitude, first.longitude),
            country: first.country,
            admin1: first.admin1,
        }))
    }

    /// Reverse geocoding. Falls back to a coordinate label when the provider
    /// knows the country but no locality.
    pub async fn reverse(&self, coordinate: Coordinate) -> Result<Location, DashboardError> {
        let payload: ReverseResponse = self
            .client
            .get(&self.reverse_url)
            .query(&[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("localityLanguage", "en".to_string()),
            ])
            .send()
            .await
            .map_err(|err| DashboardError::upstream("reverse geocoding request failed", err))?
            .error_for_status()
            .map_err(|err| {
                DashboardError::upstream(
                    "reverse geocoding request returned non-success status",
                    err,
                )
            })?
            .json()
            .await
            .map_err(|err| {
                DashboardError::upstream("failed to decode reverse geocoding response", err)
            })?;

        let name = [payload.city, payload.locality]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty());

        match (name, payload.country_name) {
            (Some(name), country) => Ok(Location {
                name,
                coordinate,
                country,
                admin1: payload.principal_subdivision.filter(|s| !s.is_empty()),
            }),
            (None, Some(country)) if !country.is_empty() => Ok(Location {
                country: Some(country),
                ..Location::from_coords(coordinate.latitude, coordinate.longitude)
            }),
            _ => Err(DashboardError::NotFound(format!(
                "{:.4}, {:.4}",
                coordinate.latitude, coordinate.longitude
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseResponse {
    city: Option<String>,
    locality: Option<String>,
    principal_subdivision: Option<String>,
    country_name: Option<String>,
}
