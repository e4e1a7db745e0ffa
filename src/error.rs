use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no location found for {0:?}")]
    NotFound(String),

    #[error("{context}: {message}")]
    Upstream {
        context: &'static str,
        message: String,
    },

    #[error("hourly series `{field}` has {actual} entries, expected {expected}")]
    SeriesLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl DashboardError {
    pub fn upstream(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Upstream {
            context,
            message: err.to_string(),
        }
    }

    /// Static text shown to the user in place of the failed step.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "Latitude and longitude are required",
            Self::InvalidInput(_) => "The request contained invalid values",
            Self::NotFound(_) => "Location not found. Try another city name.",
            Self::Upstream { .. } => "Failed to fetch air quality data",
            Self::SeriesLengthMismatch { .. } => "Received malformed air quality data",
        }
    }
}
