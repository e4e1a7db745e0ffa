use chrono::NaiveDateTime;

use super::AirQualityReading;

pub const DEFAULT_TREND_HOURS: usize = 24;

const MICROGRAMS: &str = "µg/m³";
const MILLIGRAMS: &str = "mg/m³";

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub time: NaiveDateTime,
    pub pm2_5: Option<f64>,
    pub ozone: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollutantRow {
    pub name: &'static str,
    pub value: Option<f64>,
    pub unit: &'static str,
}

/// First `limit` hourly samples, in provider order.
#[must_use]
pub fn derive_hourly_series(reading: &AirQualityReading, limit: usize) -> Vec<TrendPoint> {
    reading
        .hourly
        .samples()
        .iter()
        .take(limit)
        .map(|sample| TrendPoint {
            time: sample.time,
            pm2_5: sample.pm2_5,
            ozone: sample.ozone,
        })
        .collect()
}

#[must_use]
pub fn derive_pollutant_rows(reading: &AirQualityReading) -> [PollutantRow; 6] {
    let current = &reading.current;
    [
        PollutantRow {
            name: "PM10",
            value: current.pm10,
            unit: MICROGRAMS,
        },
        PollutantRow {
            name: "PM2.5",
            value: current.pm2_5,
            unit: MICROGRAMS,
        },
        PollutantRow {
            name: "Carbon Monoxide",
            value: current.carbon_monoxide.map(micrograms_to_milligrams),
            unit: MILLIGRAMS,
        },
        PollutantRow {
            name: "Nitrogen Dioxide",
            value: current.nitrogen_dioxide,
            unit: MICROGRAMS,
        },
        PollutantRow {
            name: "Sulphur Dioxide",
            value: current.sulphur_dioxide,
            unit: MICROGRAMS,
        },
        PollutantRow {
            name: "Ozone",
            value: current.ozone,
            unit: MICROGRAMS,
        },
    ]
}

#[must_use]
pub fn micrograms_to_milligrams(value: f64) -> f64 {
    value / 1000.0
}

/// Trend sample with the highest PM2.5 reading.
#[must_use]
pub fn peak_trend_point(points: &[TrendPoint]) -> Option<&TrendPoint> {
    points
        .iter()
        .filter(|point| point.pm2_5.is_some())
        .max_by(|a, b| {
            a.pm2_5
                .unwrap_or_default()
                .total_cmp(&b.pm2_5.unwrap_or_default())
        })
}
