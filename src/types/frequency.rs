//! Defines the sampling frequency of Open-Meteo data and the variables requested for it.

use std::fmt;

/// Name of the timestamp column in every frame built by this crate.
pub const DATE_COLUMN: &str = "date";
pub const WEATHER_CODE: &str = "weather_code";
pub const TEMPERATURE_MAX: &str = "temperature_2m_max";
pub const TEMPERATURE_MIN: &str = "temperature_2m_min";
pub const DAYLIGHT_DURATION: &str = "daylight_duration";
pub const RAIN_SUM: &str = "rain_sum";
pub const TEMPERATURE: &str = "temperature_2m";

/// The fixed daily columns of a [`crate::LocationFrame`], in request order.
///
/// The provider returns one value array per requested variable; the columns of the
/// resulting frame follow this order exactly.
pub const DAILY_VARIABLES: [&str; 5] = [
    WEATHER_CODE,
    TEMPERATURE_MAX,
    TEMPERATURE_MIN,
    DAYLIGHT_DURATION,
    RAIN_SUM,
];

pub const HOURLY_VARIABLES: [&str; 1] = [TEMPERATURE];

/// Represents the time frequency of weather data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// One sample per hour.
    Hourly,
    /// One aggregated sample per day (min/max temperature, rain sum, ...).
    Daily,
}

impl Frequency {
    /// Query parameter name used by the Open-Meteo API for this frequency.
    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
        }
    }

    pub(crate) fn cache_file_prefix(&self) -> String {
        format!("{}-", self.path_segment())
    }

    /// Variables requested for this frequency, in column order.
    pub fn variables(&self) -> &'static [&'static str] {
        match self {
            Frequency::Hourly => &HOURLY_VARIABLES,
            Frequency::Daily => &DAILY_VARIABLES,
        }
    }

    /// Nominal distance between two samples.
    pub fn interval_seconds(&self) -> i64 {
        match self {
            Frequency::Hourly => 3_600,
            Frequency::Daily => 86_400,
        }
    }
}

/// Allows formatting a `Frequency` variant using its `path_segment`.
///
/// # Examples
///
/// ```
/// use weerdash::Frequency;
///
/// assert_eq!(format!("{}", Frequency::Hourly), "hourly");
/// assert_eq!(Frequency::Daily.to_string(), "daily");
/// ```
impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}
