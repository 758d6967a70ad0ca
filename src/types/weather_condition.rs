//! Defines the `WeatherCondition` enum, mapping the WMO weather interpretation codes found in
//! the `weather_code` column to descriptive variants.

/// Represents a WMO weather interpretation code as reported by Open-Meteo.
///
/// Daily data reports the most severe condition of the day. See the
/// [Open-Meteo documentation](https://open-meteo.com/en/docs#weathervariables)
/// for the code table.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WeatherCondition {
    /// Code 0: Clear sky.
    Clear,
    /// Codes 1, 2: Mainly clear, partly cloudy.
    PartlyCloudy,
    /// Code 3: Overcast.
    Overcast,
    /// Codes 45, 48: Fog and depositing rime fog.
    Fog,
    /// Codes 51, 53, 55: Drizzle (light, moderate, dense).
    Drizzle,
    /// Codes 56, 57: Freezing drizzle.
    FreezingDrizzle,
    /// Codes 61, 63: Slight or moderate rain.
    Rain,
    /// Code 65: Heavy rain.
    HeavyRain,
    /// Codes 66, 67: Freezing rain.
    FreezingRain,
    /// Codes 71, 73, 75: Snowfall.
    Snowfall,
    /// Code 77: Snow grains.
    SnowGrains,
    /// Codes 80, 81, 82: Rain showers.
    RainShower,
    /// Codes 85, 86: Snow showers.
    SnowShower,
    /// Code 95: Thunderstorm.
    Thunderstorm,
    /// Codes 96, 99: Thunderstorm with hail.
    ThunderstormWithHail,
}

impl WeatherCondition {
    /// Attempts to convert a WMO code into a `WeatherCondition` variant.
    ///
    /// Returns `None` for codes outside the WMO table used by Open-Meteo.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weerdash::WeatherCondition;
    ///
    /// assert_eq!(WeatherCondition::from_wmo_code(63), Some(WeatherCondition::Rain));
    /// assert_eq!(WeatherCondition::from_wmo_code(4), None);
    /// ```
    pub fn from_wmo_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(WeatherCondition::Clear),
            1 | 2 => Some(WeatherCondition::PartlyCloudy),
            3 => Some(WeatherCondition::Overcast),
            45 | 48 => Some(WeatherCondition::Fog),
            51 | 53 | 55 => Some(WeatherCondition::Drizzle),
            56 | 57 => Some(WeatherCondition::FreezingDrizzle),
            61 | 63 => Some(WeatherCondition::Rain),
            65 => Some(WeatherCondition::HeavyRain),
            66 | 67 => Some(WeatherCondition::FreezingRain),
            71 | 73 | 75 => Some(WeatherCondition::Snowfall),
            77 => Some(WeatherCondition::SnowGrains),
            80..=82 => Some(WeatherCondition::RainShower),
            85 | 86 => Some(WeatherCondition::SnowShower),
            95 => Some(WeatherCondition::Thunderstorm),
            96 | 99 => Some(WeatherCondition::ThunderstormWithHail),
            _ => None,
        }
    }

    /// Converts a code as stored in a frame (a float column) into a condition.
    pub(crate) fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }
        Self::from_wmo_code(value as i64)
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear sky",
            WeatherCondition::PartlyCloudy => "Partly cloudy",
            WeatherCondition::Overcast => "Overcast",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::FreezingDrizzle => "Freezing drizzle",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::HeavyRain => "Heavy rain",
            WeatherCondition::FreezingRain => "Freezing rain",
            WeatherCondition::Snowfall => "Snowfall",
            WeatherCondition::SnowGrains => "Snow grains",
            WeatherCondition::RainShower => "Rain showers",
            WeatherCondition::SnowShower => "Snow showers",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::ThunderstormWithHail => "Thunderstorm with hail",
        }
    }
}
