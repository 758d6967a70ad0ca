//! Contains the `LocationFrame` structure: the daily weather table of one location.

use crate::error::DashboardError;
use crate::time_series::builder::{date_dtype, empty_frame};
use crate::types::frequency::{
    DAILY_VARIABLES, DATE_COLUMN, RAIN_SUM, TEMPERATURE_MAX, TEMPERATURE_MIN, WEATHER_CODE,
};
use crate::types::frequency::Frequency;
use crate::types::weather_condition::WeatherCondition;
use crate::weather_data::response::{frame_from_responses, ProviderResponse};
use chrono::{DateTime, Utc};
use polars::prelude::*;

/// One point of the dual-line temperature chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperaturePoint {
    pub date: DateTime<Utc>,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

/// One bar of the rainfall chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainPoint {
    pub date: DateTime<Utc>,
    pub rain_sum: Option<f64>,
}

/// Lowest daily minimum and highest daily maximum of a frame, missing values ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureExtremes {
    pub lowest_min: Option<f64>,
    pub highest_max: Option<f64>,
}

/// Daily weather data for a single location.
///
/// Always carries a `date` column (`Datetime` in milliseconds, UTC) followed by the columns
/// `weather_code`, `temperature_2m_max`, `temperature_2m_min`, `daylight_duration` and
/// `rain_sum` (all `f64`, missing readings as nulls). An empty frame still has all of them,
/// so callers can check [`LocationFrame::is_empty`] without caring about the schema.
///
/// Frames are immutable; filtering produces a new frame.
#[derive(Debug, Clone)]
pub struct LocationFrame {
    frame: DataFrame,
}

impl LocationFrame {
    /// Wraps a `DataFrame`, validating that it carries the fixed daily columns.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MissingColumn`] if one of the columns is absent and
    /// [`DashboardError::ColumnType`] if one has an unexpected data type.
    pub fn new(frame: DataFrame) -> Result<Self, DashboardError> {
        check_column(&frame, DATE_COLUMN, &date_dtype())?;
        for name in DAILY_VARIABLES {
            check_column(&frame, name, &DataType::Float64)?;
        }
        Ok(Self { frame })
    }

    /// A frame with the daily schema and no rows.
    pub fn empty() -> Result<Self, DashboardError> {
        Ok(Self {
            frame: empty_frame(&DAILY_VARIABLES)?,
        })
    }

    /// Builds the daily frame from the provider's responses to one request.
    ///
    /// No responses at all yields [`LocationFrame::empty`].
    pub fn from_responses(responses: Vec<ProviderResponse>) -> Result<Self, DashboardError> {
        let frame = frame_from_responses(responses, Frequency::Daily)?;
        Self::new(frame)
    }

    /// Skips validation; only for frames derived from an already valid frame.
    pub(crate) fn from_valid(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub(crate) fn temperature_columns(
        &self,
    ) -> Result<(&Float64Chunked, &Float64Chunked), PolarsError> {
        Ok((
            self.frame.column(TEMPERATURE_MIN)?.f64()?,
            self.frame.column(TEMPERATURE_MAX)?.f64()?,
        ))
    }

    /// The lowest `temperature_2m_min` and highest `temperature_2m_max` of the frame.
    pub fn temperature_extremes(&self) -> Result<TemperatureExtremes, PolarsError> {
        let (mins, maxs) = self.temperature_columns()?;
        Ok(TemperatureExtremes {
            lowest_min: without_nan(mins)?.min(),
            highest_max: without_nan(maxs)?.max(),
        })
    }

    /// Timestamps of the rows, in order.
    pub fn dates(&self) -> Result<Vec<DateTime<Utc>>, DashboardError> {
        let millis = self.frame.column(DATE_COLUMN)?.cast(&DataType::Int64)?;
        millis
            .i64()?
            .into_iter()
            .map(|ms| {
                ms.and_then(DateTime::from_timestamp_millis)
                    .ok_or_else(|| DashboardError::InvalidTimestamp(ms))
            })
            .collect()
    }

    /// Decoded `weather_code` per row; `None` for missing or unknown codes.
    pub fn weather_conditions(&self) -> Result<Vec<Option<WeatherCondition>>, DashboardError> {
        Ok(self
            .frame
            .column(WEATHER_CODE)?
            .f64()?
            .into_iter()
            .map(|code| code.and_then(WeatherCondition::from_f64))
            .collect())
    }

    /// Data for the max/min temperature line chart.
    pub fn temperature_points(&self) -> Result<Vec<TemperaturePoint>, DashboardError> {
        let dates = self.dates()?;
        let (mins, maxs) = self.temperature_columns()?;
        Ok(dates
            .into_iter()
            .zip(maxs.into_iter().zip(mins.into_iter()))
            .map(|(date, (max, min))| TemperaturePoint { date, max, min })
            .collect())
    }

    /// Data for the rainfall bar chart.
    pub fn rain_points(&self) -> Result<Vec<RainPoint>, DashboardError> {
        let dates = self.dates()?;
        let rain = self.frame.column(RAIN_SUM)?.f64()?;
        Ok(dates
            .into_iter()
            .zip(rain.into_iter())
            .map(|(date, rain_sum)| RainPoint { date, rain_sum })
            .collect())
    }
}

fn check_column(frame: &DataFrame, name: &str, expected: &DataType) -> Result<(), DashboardError> {
    let column = frame
        .column(name)
        .map_err(|_| DashboardError::MissingColumn(name.to_string()))?;
    if column.dtype() != expected {
        return Err(DashboardError::ColumnType {
            column: name.to_string(),
            expected: expected.clone(),
            found: column.dtype().clone(),
        });
    }
    Ok(())
}

/// Drops NaN readings; nulls go with them since the mask is null there.
fn without_nan(ca: &Float64Chunked) -> Result<Float64Chunked, PolarsError> {
    ca.filter(&ca.is_not_nan())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::time_series::axis::TimeAxis;
    use crate::time_series::builder::build_frame;
    use crate::time_series::variable::VariableSeries;

    pub const JAN_1_2021: i64 = 1_609_459_200;

    /// Builds a daily frame starting 2021-01-01 from (min, max) pairs.
    pub fn frame_from_pairs(pairs: &[(f64, f64)]) -> LocationFrame {
        let days = pairs.len() as i64;
        let axis = TimeAxis::from_unix(JAN_1_2021, JAN_1_2021 + days * 86_400, 86_400).unwrap();
        let mins: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let maxs: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let zeros = vec![0.0; pairs.len()];
        let frame = build_frame(
            &axis,
            vec![
                VariableSeries::from_f64(WEATHER_CODE, &vec![3.0; pairs.len()]),
                VariableSeries::from_f64(TEMPERATURE_MAX, &maxs),
                VariableSeries::from_f64(TEMPERATURE_MIN, &mins),
                VariableSeries::from_f64("daylight_duration", &zeros),
                VariableSeries::from_f64(RAIN_SUM, &zeros),
            ],
        )
        .unwrap();
        LocationFrame::new(frame).unwrap()
    }

    #[test]
    fn test_new_rejects_missing_column() -> Result<(), Box<dyn std::error::Error>> {
        let mut frame = LocationFrame::empty()?.into_frame();
        let _ = frame.drop_in_place(RAIN_SUM)?;
        assert!(matches!(
            LocationFrame::new(frame),
            Err(DashboardError::MissingColumn(c)) if c == RAIN_SUM
        ));
        Ok(())
    }

    #[test]
    fn test_new_rejects_wrong_type() -> Result<(), Box<dyn std::error::Error>> {
        let mut frame = LocationFrame::empty()?.into_frame();
        frame.with_column(Series::new(RAIN_SUM.into(), Vec::<i64>::new()))?;
        assert!(matches!(
            LocationFrame::new(frame),
            Err(DashboardError::ColumnType { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_from_responses() -> Result<(), Box<dyn std::error::Error>> {
        use crate::weather_data::response::tests::daily_response;

        let frame = LocationFrame::from_responses(vec![daily_response(&[(-3.0, 4.5), (0.0, 8.0)])])?;
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.temperature_extremes()?.lowest_min, Some(-3.0));

        let none = LocationFrame::from_responses(Vec::new())?;
        assert!(none.is_empty());
        assert_eq!(none.frame().schema(), LocationFrame::empty()?.frame().schema());
        Ok(())
    }

    #[test]
    fn test_empty_has_schema() -> Result<(), Box<dyn std::error::Error>> {
        let empty = LocationFrame::empty()?;
        assert!(empty.is_empty());
        assert_eq!(empty.frame().width(), 6);
        assert_eq!(empty.temperature_extremes()?, TemperatureExtremes::default());
        assert!(empty.temperature_points()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_extremes_ignore_missing() -> Result<(), Box<dyn std::error::Error>> {
        let frame = frame_from_pairs(&[(-5.0, 10.0), (f64::NAN, 30.0), (3.0, f64::NAN), (-1.5, 12.0)]);
        let extremes = frame.temperature_extremes()?;
        assert_eq!(extremes.lowest_min, Some(-5.0));
        assert_eq!(extremes.highest_max, Some(30.0));
        Ok(())
    }

    #[test]
    fn test_extremes_ignore_raw_nan() -> Result<(), Box<dyn std::error::Error>> {
        let mut raw = frame_from_pairs(&[(1.0, 5.0), (2.0, 6.0)]).into_frame();
        raw.with_column(Series::new(TEMPERATURE_MIN.into(), [f64::NAN, 2.0]))?;
        raw.with_column(Series::new(TEMPERATURE_MAX.into(), [5.0, f64::NAN]))?;
        let extremes = LocationFrame::new(raw)?.temperature_extremes()?;
        assert_eq!(extremes.lowest_min, Some(2.0));
        assert_eq!(extremes.highest_max, Some(5.0));
        Ok(())
    }

    #[test]
    fn test_chart_points() -> Result<(), Box<dyn std::error::Error>> {
        let frame = frame_from_pairs(&[(1.0, 6.0), (f64::NAN, 7.0)]);
        let points = frame.temperature_points()?;
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date.timestamp(), JAN_1_2021);
        assert_eq!(points[1].date.timestamp(), JAN_1_2021 + 86_400);
        assert_eq!((points[0].min, points[0].max), (Some(1.0), Some(6.0)));
        assert_eq!((points[1].min, points[1].max), (None, Some(7.0)));

        let rain = frame.rain_points()?;
        assert_eq!(rain.len(), 2);
        assert_eq!(rain[1].rain_sum, Some(0.0));
        Ok(())
    }

    #[test]
    fn test_weather_conditions() -> Result<(), Box<dyn std::error::Error>> {
        let frame = frame_from_pairs(&[(1.0, 6.0)]);
        assert_eq!(
            frame.weather_conditions()?,
            vec![Some(WeatherCondition::Overcast)]
        );
        Ok(())
    }
}
