use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeSeriesError {
    #[error("Sample interval must be positive, got {0} seconds")]
    NonPositiveInterval(i64),

    #[error("Sample interval of {0} seconds is too large")]
    IntervalOutOfRange(i64),

    #[error("Timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    #[error("Variable '{variable}' has {found} values, expected {expected} (one per time step)")]
    LengthMismatch {
        variable: String,
        expected: usize,
        found: usize,
    },

    #[error("Variable '{0}' was supplied more than once")]
    DuplicateVariable(String),

    #[error("Variable name '{0}' is reserved for the timestamp column")]
    ReservedName(String),

    #[error("Failed building DataFrame: {0}")]
    DataFrame(#[from] PolarsError),
}
