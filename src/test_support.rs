use chrono::{Duration, NaiveDateTime, Utc};

use crate::{
    app::pipeline::Services,
    config::{DashboardConfig, Endpoints, InsightConfig, ProxyTarget, StartLocation},
    domain::{
        air_quality::{
            AirQualityReading, CurrentReadings, DEFAULT_TREND_HOURS, HourlyReadings, HourlySample,
        },
        location::{Coordinate, Location},
    },
};

/// Points every endpoint at a closed loopback port.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn parse_time(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid time fixture")
}

pub(crate) fn offline_config(start: StartLocation) -> DashboardConfig {
    DashboardConfig {
        proxy: ProxyTarget::Remote(UNREACHABLE.to_string()),
        endpoints: Endpoints {
            geocode_url: UNREACHABLE.to_string(),
            reverse_geocode_url: UNREACHABLE.to_string(),
            geoip_url: UNREACHABLE.to_string(),
        },
        insight: InsightConfig::default(),
        start,
        trend_hours: DEFAULT_TREND_HOURS,
        refresh_interval_secs: 0,
    }
}

pub(crate) fn offline_services(config: &DashboardConfig) -> Services {
    Services::new(config, UNREACHABLE)
}

pub(crate) fn stockholm() -> Location {
    Location {
        name: "Stockholm".to_string(),
        coordinate: Coordinate::new(59.3293, 18.0686),
        country: Some("Sweden".to_string()),
        admin1: Some("Stockholm".to_string()),
    }
}

pub(crate) fn sample_reading() -> AirQualityReading {
    let start = parse_time("2026-02-12T00:00");
    let samples = (0..72)
        .map(|idx| HourlySample {
            time: start + Duration::hours(idx),
            pm10: Some(18.0 + (idx % 6) as f64),
            pm2_5: Some(8.0 + (idx % 12) as f64),
            ozone: Some(50.0 + (idx % 8) as f64 * 2.5),
        })
        .collect();

    AirQualityReading {
        current: CurrentReadings {
            european_index: Some(31.0),
            us_index: Some(42.0),
            pm10: Some(18.4),
            pm2_5: Some(9.7),
            carbon_monoxide: Some(800.0),
            nitrogen_dioxide: Some(14.2),
            sulphur_dioxide: Some(2.1),
            ozone: Some(71.0),
        },
        hourly: HourlyReadings::from_samples(samples),
        fetched_at: Utc::now(),
    }
}
