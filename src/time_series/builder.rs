//! Turns provider metadata plus per-variable value arrays into a timestamped DataFrame.

use crate::time_series::axis::TimeAxis;
use crate::time_series::error::TimeSeriesError;
use crate::time_series::variable::VariableSeries;
use crate::types::frequency::DATE_COLUMN;
use log::debug;
use polars::prelude::*;
use std::collections::HashSet;

/// Data type of the timestamp column. Values are UTC.
pub(crate) fn date_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Milliseconds, None)
}

/// Builds a frame with a `date` column derived from `axis` and one `f64` column per variable,
/// in the order given.
///
/// # Errors
///
/// * [`TimeSeriesError::LengthMismatch`] if a variable does not have exactly one value per
///   time step. Misaligned arrays are never truncated or padded.
/// * [`TimeSeriesError::DuplicateVariable`] / [`TimeSeriesError::ReservedName`] for invalid names.
pub fn build_frame(
    axis: &TimeAxis,
    variables: Vec<VariableSeries>,
) -> Result<DataFrame, TimeSeriesError> {
    let expected = axis.len();
    let mut seen = HashSet::with_capacity(variables.len());
    for variable in &variables {
        if variable.name() == DATE_COLUMN {
            return Err(TimeSeriesError::ReservedName(variable.name().to_string()));
        }
        if !seen.insert(variable.name().to_string()) {
            return Err(TimeSeriesError::DuplicateVariable(variable.name().to_string()));
        }
        if variable.len() != expected {
            return Err(TimeSeriesError::LengthMismatch {
                variable: variable.name().to_string(),
                expected,
                found: variable.len(),
            });
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(variables.len() + 1);
    let dates = Series::new(DATE_COLUMN.into(), axis.timestamp_millis()).cast(&date_dtype())?;
    columns.push(dates.into());
    for variable in variables {
        let (name, values) = variable.into_parts();
        columns.push(Series::new(name.as_str().into(), values).into());
    }

    debug!(
        "Built frame with {} rows and {} variables starting at {}",
        expected,
        columns.len() - 1,
        axis.start()
    );
    Ok(DataFrame::new(columns)?)
}

/// A frame with the given variable columns and no rows.
pub fn empty_frame(variable_names: &[&str]) -> Result<DataFrame, TimeSeriesError> {
    let variables = variable_names
        .iter()
        .map(|name| VariableSeries::new(*name, Vec::new()))
        .collect();
    build_frame(&TimeAxis::empty(), variables)
}
