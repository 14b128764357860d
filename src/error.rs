//! Error types shared by the ledger, forecasting, and price cache modules

use thiserror::Error;

/// Minimum number of samples (or Monte Carlo runs) for a confidence interval
pub const MIN_SAMPLES: usize = 3;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ForecastError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ForecastError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn insufficient(actual: usize) -> Self {
        ForecastError::InsufficientSamples {
            required: MIN_SAMPLES,
            actual,
        }
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;
