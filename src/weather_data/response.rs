//! Provider responses and their conversion into frames.

use crate::time_series::axis::TimeAxis;
use crate::time_series::builder::{build_frame, empty_frame};
use crate::time_series::error::TimeSeriesError;
use crate::time_series::variable::VariableSeries;
use crate::types::frequency::Frequency;
use crate::types::location::LatLon;
use crate::weather_data::error::WeatherDataError;
use log::warn;
use polars::prelude::DataFrame;

/// Values for one frequency of a response, with the metadata describing their time axis.
///
/// `start` and `end` are Unix timestamps in seconds; `end` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBlock {
    pub start: i64,
    pub end: i64,
    pub interval_seconds: i64,
    pub variables: Vec<VariableSeries>,
}

impl VariableBlock {
    pub fn new(start: i64, end: i64, interval_seconds: i64, variables: Vec<VariableSeries>) -> Self {
        Self {
            start,
            end,
            interval_seconds,
            variables,
        }
    }

    pub fn axis(&self) -> Result<TimeAxis, TimeSeriesError> {
        TimeAxis::from_unix(self.start, self.end, self.interval_seconds)
    }

    pub fn variable(&self, name: &str) -> Option<&VariableSeries> {
        self.variables.iter().find(|v| v.name() == name)
    }

    /// Checks that the block holds exactly `expected`, in that order.
    pub fn check_variables(
        &self,
        frequency: Frequency,
        expected: &[&str],
    ) -> Result<(), WeatherDataError> {
        for position in 0..expected.len().max(self.variables.len()) {
            let found = self.variables.get(position).map(|v| v.name());
            let wanted = expected.get(position).copied();
            if found != wanted {
                return Err(WeatherDataError::VariableMismatch {
                    frequency,
                    position,
                    expected: wanted.unwrap_or("<none>").to_string(),
                    found: found.map(str::to_string),
                });
            }
        }
        Ok(())
    }

    pub fn into_frame(self) -> Result<DataFrame, TimeSeriesError> {
        let axis = self.axis()?;
        build_frame(&axis, self.variables)
    }
}

/// One location's answer from a [`crate::WeatherDataSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// Latitude of the grid cell the data was taken from.
    pub latitude: f64,
    /// Longitude of the grid cell the data was taken from.
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub utc_offset_seconds: i32,
    pub timezone: String,
    pub daily: Option<VariableBlock>,
    pub hourly: Option<VariableBlock>,
}

impl ProviderResponse {
    pub fn grid_coordinates(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }

    pub fn block(&self, frequency: Frequency) -> Option<&VariableBlock> {
        match frequency {
            Frequency::Daily => self.daily.as_ref(),
            Frequency::Hourly => self.hourly.as_ref(),
        }
    }

    fn take_block(&mut self, frequency: Frequency) -> Option<VariableBlock> {
        match frequency {
            Frequency::Daily => self.daily.take(),
            Frequency::Hourly => self.hourly.take(),
        }
    }
}

/// Builds the frame for `frequency` from the responses of a single-location request.
///
/// Zero responses give an empty frame that still has every column of the frequency.
///
/// # Errors
///
/// * [`WeatherDataError::MissingBlock`] if the response holds no data for `frequency`.
/// * [`WeatherDataError::VariableMismatch`] if its variables differ from those requested.
/// * [`WeatherDataError::TimeSeries`] if the values do not line up with the time axis.
pub fn frame_from_responses(
    mut responses: Vec<ProviderResponse>,
    frequency: Frequency,
) -> Result<DataFrame, WeatherDataError> {
    if responses.is_empty() {
        warn!("Provider returned no {} data, using an empty frame", frequency);
        return Ok(empty_frame(frequency.variables())?);
    }
    if responses.len() > 1 {
        warn!(
            "Provider returned {} responses for one location, using the first",
            responses.len()
        );
    }

    let block = responses
        .swap_remove(0)
        .take_block(frequency)
        .ok_or(WeatherDataError::MissingBlock(frequency))?;
    block.check_variables(frequency, frequency.variables())?;
    Ok(block.into_frame()?)
}
