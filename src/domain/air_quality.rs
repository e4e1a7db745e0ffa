use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

mod metrics;

pub use metrics::{
    DEFAULT_TREND_HOURS, PollutantRow, TrendPoint, derive_hourly_series, derive_pollutant_rows,
    micrograms_to_milligrams, peak_trend_point,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityTier {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl SeverityTier {
    /// Ordered from the lowest band to the highest.
    pub const ALL: [SeverityTier; 6] = [
        SeverityTier::Good,
        SeverityTier::Moderate,
        SeverityTier::UnhealthySensitive,
        SeverityTier::Unhealthy,
        SeverityTier::VeryUnhealthy,
        SeverityTier::Hazardous,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Inclusive upper bound of the band; `None` for the open-ended top band.
    #[must_use]
    pub fn upper_bound(self) -> Option<f64> {
        match self {
            Self::Good => Some(50.0),
            Self::Moderate => Some(100.0),
            Self::UnhealthySensitive => Some(150.0),
            Self::Unhealthy => Some(200.0),
            Self::VeryUnhealthy => Some(300.0),
            Self::Hazardous => None,
        }
    }

    /// EPA reporting color as `#rrggbb`.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#00e400",
            Self::Moderate => "#ffff00",
            Self::UnhealthySensitive => "#ff7e00",
            Self::Unhealthy => "#ff0000",
            Self::VeryUnhealthy => "#8f3f97",
            Self::Hazardous => "#7e0023",
        }
    }

    #[must_use]
    pub fn advice(self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory. Enjoy outdoor activities.",
            Self::Moderate => "Unusually sensitive people should limit prolonged exertion.",
            Self::UnhealthySensitive => {
                "Children, older adults and people with lung disease should reduce exertion."
            }
            Self::Unhealthy => "Everyone should reduce prolonged or heavy outdoor exertion.",
            Self::VeryUnhealthy => "Avoid outdoor exertion. Keep windows closed.",
            Self::Hazardous => "Stay indoors and avoid all physical activity outdoors.",
        }
    }
}

/// Maps a US AQI value onto its severity band.
///
/// Bands are checked from the lowest upward and the first band whose upper
/// bound is `>= index` wins, so a value sitting exactly on a boundary belongs
/// to the lower band. Negative and NaN values are rejected.
pub fn classify(index: f64) -> Result<SeverityTier, DashboardError> {
    if index.is_nan() || index < 0.0 {
        return Err(DashboardError::InvalidInput(format!(
            "air quality index must be a non-negative number, got {index}"
        )));
    }

    let tier = SeverityTier::ALL
        .into_iter()
        .find(|tier| tier.upper_bound().is_none_or(|upper| index <= upper))
        .unwrap_or(SeverityTier::Hazardous);
    Ok(tier)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentReadings {
    pub european_index: Option<f64>,
    pub us_index: Option<f64>,
    pub pm10: Option<f64>,
    pub pm2_5: Option<f64>,
    pub carbon_monoxide: Option<f64>,
    pub nitrogen_dioxide: Option<f64>,
    pub sulphur_dioxide: Option<f64>,
    pub ozone: Option<f64>,
}

impl CurrentReadings {
    /// Tier for the US index, `None` when the provider did not report one.
    pub fn severity(&self) -> Option<Result<SeverityTier, DashboardError>> {
        self.us_index.map(classify)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlySample {
    pub time: NaiveDateTime,
    pub pm10: Option<f64>,
    pub pm2_5: Option<f64>,
    pub ozone: Option<f64>,
}

/// Hourly readings stored as aligned samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyReadings {
    samples: Vec<HourlySample>,
}

impl HourlyReadings {
    /// Builds the series from the provider's parallel columns.
    ///
    /// Every column must have as many entries as `time`. Rows whose timestamp
    /// does not parse are dropped whole.
    pub fn from_columns(
        time: &[String],
        pm10: &[Option<f64>],
        pm2_5: &[Option<f64>],
        ozone: &[Option<f64>],
    ) -> Result<Self, DashboardError> {
        let expected = time.len();
        for (field, actual) in [
            ("pm10", pm10.len()),
            ("pm2_5", pm2_5.len()),
            ("ozone", ozone.len()),
        ] {
            if actual != expected {
                return Err(DashboardError::SeriesLengthMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }

        let samples = time
            .iter()
            .enumerate()
            .filter_map(|(idx, raw)| {
                let time = parse_datetime(raw)?;
                Some(HourlySample {
                    time,
                    pm10: pm10[idx],
                    pm2_5: pm2_5[idx],
                    ozone: ozone[idx],
                })
            })
            .collect();

        Ok(Self { samples })
    }

    pub fn from_samples(samples: Vec<HourlySample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[HourlySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityReading {
    pub current: CurrentReadings,
    pub hourly: HourlyReadings,
    pub fetched_at: DateTime<Utc>,
}

#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()
}
