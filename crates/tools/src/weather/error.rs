//! Weather lookup error taxonomy.

use std::fmt;
use thiserror::Error;

/// Which of the two sequential requests a fault came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocoding,
    Forecasting,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocoding => "geocoding",
            Stage::Forecasting => "forecast",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a [`WeatherError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The geocoder returned no candidates.
    NotFound,
    /// Transport failure or non-success status from either service.
    Upstream,
    /// A response body could not be decoded or lacked a required field.
    Malformed,
}

/// Errors raised while resolving a city and fetching its conditions.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Can't find location for '{city}'.")]
    NotFound { city: String },

    #[error("{stage} request failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("{stage} service returned {status}: {body}")]
    Status {
        stage: Stage,
        status: u16,
        body: String,
    },

    #[error("Malformed {stage} response: {detail}")]
    Malformed { stage: Stage, detail: String },
}

impl WeatherError {
    pub fn kind(&self) -> FaultKind {
        match self {
            WeatherError::NotFound { .. } => FaultKind::NotFound,
            WeatherError::Transport { .. } | WeatherError::Status { .. } => FaultKind::Upstream,
            WeatherError::Malformed { .. } => FaultKind::Malformed,
        }
    }

    /// Stage the fault occurred in. Not-found always happens while geocoding.
    pub fn stage(&self) -> Stage {
        match self {
            WeatherError::NotFound { .. } => Stage::Geocoding,
            WeatherError::Transport { stage, .. }
            | WeatherError::Status { stage, .. }
            | WeatherError::Malformed { stage, .. } => *stage,
        }
    }

    pub(crate) fn malformed(stage: Stage, detail: impl Into<String>) -> Self {
        WeatherError::Malformed {
            stage,
            detail: detail.into(),
        }
    }
}
