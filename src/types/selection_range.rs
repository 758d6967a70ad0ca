//! Inclusive integer temperature bounds used to filter what is displayed.

use crate::filtering::RangeError;
use std::fmt;

/// An inclusive `lower..=upper` temperature range in whole degrees Celsius.
///
/// The full range of a comparison is derived by [`crate::compute_bounds`], rounding
/// outward so no observed value falls outside it. A user selection is then taken
/// from inside that range with [`SelectionRange::sub_range`].
///
/// # Examples
///
/// ```
/// use weerdash::SelectionRange;
///
/// let bounds = SelectionRange::new(-8, 15).unwrap();
/// let picked = bounds.sub_range(0, 10).unwrap();
/// assert!(picked.contains(0.0));
/// assert!(picked.contains(10.0));
/// assert!(!picked.contains(10.5));
/// assert!(bounds.sub_range(-9, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    lower: i64,
    upper: i64,
}

impl SelectionRange {
    /// Creates a range, rejecting `lower > upper`.
    pub fn new(lower: i64, upper: i64) -> Result<Self, RangeError> {
        if lower > upper {
            return Err(RangeError::InvertedRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Smallest range covering `min..=max`, rounding `min` down and `max` up.
    ///
    /// Returns `None` for non-finite input. When `floor(min) > ceil(max)` the upper bound
    /// is raised to the lower one.
    pub(crate) fn covering(min: f64, max: f64) -> Option<Self> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let lower = min.floor() as i64;
        let upper = (max.ceil() as i64).max(lower);
        Some(Self { lower, upper })
    }

    pub fn lower(&self) -> i64 {
        self.lower
    }

    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Whether `value` lies inside the range. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower as f64 && value <= self.upper as f64
    }

    /// Picks a range inside `self`, as a range slider bounded by `self` would.
    pub fn sub_range(&self, lower: i64, upper: i64) -> Result<SelectionRange, RangeError> {
        let picked = SelectionRange::new(lower, upper)?;
        if picked.lower < self.lower || picked.upper > self.upper {
            return Err(RangeError::OutsideBounds {
                lower,
                upper,
                bounds: *self,
            });
        }
        Ok(picked)
    }
}

impl fmt::Display for SelectionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={} °C", self.lower, self.upper)
    }
}
