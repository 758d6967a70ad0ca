use crate::filtering::RangeError;
use crate::time_series::error::TimeSeriesError;
use crate::weather_data::error::WeatherDataError;
use polars::prelude::{DataType, PolarsError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    TimeSeries(#[from] TimeSeriesError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),

    #[error("Unknown location '{0}'")]
    UnknownLocation(String),

    #[error("Select at least one location to compare")]
    NoLocationSelected,

    #[error("Required column '{0}' not found in frame")]
    MissingColumn(String),

    #[error("Column '{column}' has type {found}, expected {expected}")]
    ColumnType {
        column: String,
        expected: DataType,
        found: DataType,
    },

    #[error("Invalid timestamp {0:?} in date column")]
    InvalidTimestamp(Option<i64>),

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),
}
