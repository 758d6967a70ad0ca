//! Derives a common temperature range over several locations and filters frames by it.

use crate::types::frequency::{TEMPERATURE_MAX, TEMPERATURE_MIN};
use crate::types::location_frame::LocationFrame;
use crate::types::selection_range::SelectionRange;
use log::debug;
use polars::error::PolarsError;
use polars::prelude::{col, lit, IntoLazy};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RangeError {
    #[error("No temperature data available for the selected locations")]
    NoTemperatureData,

    #[error("Invalid range: lower bound {lower} exceeds upper bound {upper}")]
    InvertedRange { lower: i64, upper: i64 },

    #[error("Range {lower}..={upper} lies outside the available range {bounds}")]
    OutsideBounds {
        lower: i64,
        upper: i64,
        bounds: SelectionRange,
    },

    #[error("Failed reading temperature columns: {0}")]
    Polars(#[from] PolarsError),
}

/// Computes the smallest integer range covering every frame's temperatures.
///
/// The lower bound is `floor` of the lowest `temperature_2m_min` across all frames, the upper
/// bound `ceil` of the highest `temperature_2m_max`. Missing values and empty frames are
/// ignored, so selecting the full range never hides a real reading.
///
/// # Errors
///
/// Returns [`RangeError::NoTemperatureData`] when no frame holds a single valid minimum and
/// maximum temperature. Callers should report this instead of rendering.
pub fn compute_bounds<'a>(
    frames: impl IntoIterator<Item = &'a LocationFrame>,
) -> Result<SelectionRange, RangeError> {
    let mut lowest: Option<f64> = None;
    let mut highest: Option<f64> = None;

    for frame in frames {
        let extremes = frame.temperature_extremes()?;
        if let Some(min) = extremes.lowest_min {
            lowest = Some(lowest.map_or(min, |l| l.min(min)));
        }
        if let Some(max) = extremes.highest_max {
            highest = Some(highest.map_or(max, |h| h.max(max)));
        }
    }

    match (lowest, highest) {
        (Some(min), Some(max)) => {
            let bounds =
                SelectionRange::covering(min, max).ok_or(RangeError::NoTemperatureData)?;
            debug!("Observed {} to {}, bounds {}", min, max, bounds);
            Ok(bounds)
        }
        _ => Err(RangeError::NoTemperatureData),
    }
}

pub trait TemperatureFilterExt: Sized {
    /// Keeps rows whose `temperature_2m_min >= selection.lower()` **and**
    /// `temperature_2m_max <= selection.upper()`.
    ///
    /// Both bounds are inclusive. A day whose swing straddles an edge of the selection is
    /// dropped even if one of the two temperatures alone would pass. Rows missing either
    /// temperature never match. The result keeps the full schema when no row matches.
    fn filter_temperature(&self, selection: &SelectionRange) -> Result<Self, RangeError>;
}

impl TemperatureFilterExt for LocationFrame {
    fn filter_temperature(&self, selection: &SelectionRange) -> Result<Self, RangeError> {
        let lower = selection.lower() as f64;
        let upper = selection.upper() as f64;

        // Nulls never pass a filter; NaN is ruled out explicitly.
        let filtered = self
            .frame()
            .clone()
            .lazy()
            .filter(
                col(TEMPERATURE_MIN)
                    .is_not_nan()
                    .and(col(TEMPERATURE_MAX).is_not_nan())
                    .and(col(TEMPERATURE_MIN).gt_eq(lit(lower)))
                    .and(col(TEMPERATURE_MAX).lt_eq(lit(upper))),
            )
            .collect()?;
        Ok(LocationFrame::from_valid(filtered))
    }
}
