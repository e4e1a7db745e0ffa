use std::net::SocketAddr;

use crate::{
    cli::{DashboardArgs, ServeArgs},
    data::{
        air_quality::AIR_QUALITY_URL,
        geocode::{GEOCODE_URL, REVERSE_GEOCODE_URL},
        geoip::GEOIP_URL,
    },
    domain::location::Coordinate,
};

pub const DEFAULT_INSIGHT_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct InsightConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_INSIGHT_URL.to_string(),
        }
    }
}

impl InsightConfig {
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub provider_url: String,
}

impl ServerConfig {
    pub fn from_args(args: &ServeArgs) -> Self {
        Self {
            bind: args.bind,
            provider_url: args
                .provider_url
                .clone()
                .unwrap_or_else(|| AIR_QUALITY_URL.to_string()),
        }
    }
}

/// Where the dashboard sends readings requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyTarget {
    Remote(String),
    /// Start the proxy router in-process on a loopback port.
    Embedded { provider_url: String },
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub geocode_url: String,
    pub reverse_geocode_url: String,
    pub geoip_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocode_url: GEOCODE_URL.to_string(),
            reverse_geocode_url: REVERSE_GEOCODE_URL.to_string(),
            geoip_url: GEOIP_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StartLocation {
    Detect,
    City(String),
    Coordinates(Coordinate),
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub proxy: ProxyTarget,
    pub endpoints: Endpoints,
    pub insight: InsightConfig,
    pub start: StartLocation,
    pub trend_hours: usize,
    pub refresh_interval_secs: u64,
}

impl DashboardConfig {
    pub fn from_args(args: &DashboardArgs) -> anyhow::Result<Self> {
        args.validate()?;

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            geocode_url: args.geocode_url.clone().unwrap_or(defaults.geocode_url),
            reverse_geocode_url: args
                .reverse_geocode_url
                .clone()
                .unwrap_or(defaults.reverse_geocode_url),
            geoip_url: args.geoip_url.clone().unwrap_or(defaults.geoip_url),
        };

        let proxy = match &args.proxy_url {
            Some(url) => ProxyTarget::Remote(url.clone()),
            None => ProxyTarget::Embedded {
                provider_url: args
                    .provider_url
                    .clone()
                    .unwrap_or_else(|| AIR_QUALITY_URL.to_string()),
            },
        };

        let start = match (&args.city, args.lat, args.lon) {
            (Some(city), _, _) => StartLocation::City(city.clone()),
            (None, Some(lat), Some(lon)) => StartLocation::Coordinates(Coordinate::new(lat, lon)),
            _ => StartLocation::Detect,
        };

        Ok(Self {
            proxy,
            endpoints,
            insight: InsightConfig {
                api_key: args
                    .gemini_api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty()),
                model: args.model.clone(),
                base_url: args
                    .insight_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_INSIGHT_URL.to_string()),
            },
            start,
            trend_hours: usize::from(args.hours),
            refresh_interval_secs: args.refresh_interval,
        })
    }
}
