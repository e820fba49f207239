use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl AppError {
    /// True when the provider had nothing to evaluate.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, AppError::DataUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
