//! Error types for market data operations

use thiserror::Error;

/// Market data specific errors
#[derive(Debug, Error)]
pub enum DataError {
    /// Blank ticker provided
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    /// Start date after end date, or an unparseable date
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// Provider answered but had no bars for the ticker
    #[error("No price history for {ticker} between {range}")]
    NoPriceHistory { ticker: String, range: String },

    /// Provider rejected the request or could not be reached
    #[error("{provider} error: {reason}")]
    Provider {
        provider: &'static str,
        reason: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, DataError>;

impl DataError {
    pub fn provider(provider: &'static str, reason: impl ToString) -> Self {
        Self::Provider {
            provider,
            reason: reason.to_string(),
        }
    }
}

/// Bad input is a validation error; everything a provider could not deliver
/// is `DataUnavailable`
impl From<DataError> for crew_core::Error {
    fn from(err: DataError) -> Self {
        match err {
            DataError::InvalidTicker(_) | DataError::InvalidRange(_) => {
                crew_core::Error::Validation(err.to_string())
            }
            DataError::NoPriceHistory { .. } => {
                crew_core::Error::data_unavailable("yahoo_finance", err.to_string())
            }
            DataError::Provider { provider, reason } => {
                crew_core::Error::data_unavailable(provider, reason)
            }
            DataError::Network(e) => crew_core::Error::data_unavailable("http", e.to_string()),
            DataError::Json(e) => crew_core::Error::data_unavailable("json", e.to_string()),
            DataError::Config(msg) => crew_core::Error::Configuration(msg),
        }
    }
}
