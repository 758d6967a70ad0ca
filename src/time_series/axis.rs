//! The regular, half-open time axis described by provider metadata.

use crate::time_series::error::TimeSeriesError;
use chrono::{DateTime, TimeDelta, Utc};

/// A regular sequence of timestamps `start + k * interval` for every `k` with
/// `start + k * interval < end`.
///
/// The end instant is excluded, so a provider reporting `end` as "one interval past the last
/// sample" never produces a duplicate final row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: TimeDelta,
}

impl TimeAxis {
    /// Creates an axis from UTC start/end instants and an interval in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeSeriesError::NonPositiveInterval`] when `interval_seconds <= 0` and
    /// [`TimeSeriesError::IntervalOutOfRange`] when it does not fit a `TimeDelta`.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval_seconds: i64,
    ) -> Result<Self, TimeSeriesError> {
        if interval_seconds <= 0 {
            return Err(TimeSeriesError::NonPositiveInterval(interval_seconds));
        }
        let interval = TimeDelta::try_seconds(interval_seconds)
            .ok_or(TimeSeriesError::IntervalOutOfRange(interval_seconds))?;
        Ok(Self {
            start,
            end,
            interval,
        })
    }

    /// Same as [`TimeAxis::new`] with Unix timestamps in seconds, the form the provider uses.
    pub fn from_unix(start: i64, end: i64, interval_seconds: i64) -> Result<Self, TimeSeriesError> {
        let start_dt = DateTime::from_timestamp(start, 0)
            .ok_or(TimeSeriesError::TimestampOutOfRange(start))?;
        let end_dt =
            DateTime::from_timestamp(end, 0).ok_or(TimeSeriesError::TimestampOutOfRange(end))?;
        Self::new(start_dt, end_dt, interval_seconds)
    }

    /// An axis with no steps.
    pub fn empty() -> Self {
        Self {
            start: DateTime::<Utc>::UNIX_EPOCH,
            end: DateTime::<Utc>::UNIX_EPOCH,
            interval: TimeDelta::milliseconds(1_000),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn interval_seconds(&self) -> i64 {
        self.interval.num_seconds()
    }

    /// Number of steps, `ceil((end - start) / interval)`, or 0 when `end <= start`.
    pub fn len(&self) -> usize {
        let span = (self.end - self.start).num_milliseconds();
        if span <= 0 {
            return 0;
        }
        let step = self.interval.num_milliseconds();
        (span / step + i64::from(span % step != 0)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The timestamps of the axis, strictly increasing by `interval`.
    pub fn timestamps(&self) -> impl DoubleEndedIterator<Item = DateTime<Utc>> + '_ {
        let step = self.interval.num_milliseconds();
        // Every k below len() gives an offset smaller than end - start, so nothing is skipped.
        (0..self.len() as i64).filter_map(move |k| {
            k.checked_mul(step)
                .and_then(TimeDelta::try_milliseconds)
                .and_then(|offset| self.start.checked_add_signed(offset))
        })
    }

    /// Timestamps as milliseconds since the Unix epoch, the physical type of the `date` column.
    pub(crate) fn timestamp_millis(&self) -> Vec<i64> {
        let start = self.start.timestamp_millis();
        let step = self.interval.num_milliseconds();
        (0..self.len() as i64)
            .filter_map(|k| k.checked_mul(step).and_then(|o| start.checked_add(o)))
            .collect()
    }
}
