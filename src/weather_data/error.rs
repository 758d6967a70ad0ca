use crate::time_series::error::TimeSeriesError;
use crate::types::frequency::Frequency;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read metadata for cache file '{0}'")]
    CacheMetadataRead(PathBuf, #[source] std::io::Error),

    // Errors during parquet writing (inside blocking task)
    #[error("I/O error writing parquet cache file '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing parquet cache file '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("I/O error reading parquet cache file '{0}'")]
    ParquetReadIo(PathBuf, #[source] std::io::Error),
    #[error("Failed to decode parquet cache file '{0}'")]
    ParquetReadPolars(PathBuf, #[source] PolarsError),

    #[error("Failed to delete cache '{0}'")]
    CacheDeletionError(PathBuf, #[source] std::io::Error),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse weather response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Weather service unavailable: {0}")]
    Unavailable(String),

    #[error("Response contains no {0} data")]
    MissingBlock(Frequency),

    #[error("Requested {frequency} variable '{variable}' missing from response")]
    MissingVariable {
        frequency: Frequency,
        variable: String,
    },

    #[error("{frequency} variable at position {position} is {found:?}, expected '{expected}'")]
    VariableMismatch {
        frequency: Frequency,
        position: usize,
        expected: String,
        found: Option<String>,
    },

    #[error("Irregular {frequency} time axis at sample {index}")]
    IrregularTimeAxis { frequency: Frequency, index: usize },

    #[error(transparent)]
    TimeSeries(#[from] TimeSeriesError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl WeatherDataError {
    /// Whether retrying the same request may succeed.
    ///
    /// Timeouts, connection failures, 5xx, 408 and 429 responses are transient; everything
    /// else (4xx, malformed data, cache I/O) is not.
    pub fn is_transient(&self) -> bool {
        match self {
            WeatherDataError::NetworkRequest(_, e) => e.is_timeout() || e.is_connect(),
            WeatherDataError::HttpStatus { status, .. } => {
                status.is_server_error()
                    || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    || *status == reqwest::StatusCode::REQUEST_TIMEOUT
            }
            WeatherDataError::Unavailable(_) => true,
            _ => false,
        }
    }
}
