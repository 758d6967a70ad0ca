//! Settings for a [`Dashboard`](crate::Dashboard).

use crate::weather_data::open_meteo::OPEN_METEO_HISTORICAL_URL;
use crate::weather_data::retry::RetryConfig;
use bon::Builder;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;

/// Everything a dashboard needs besides its data source.
///
/// Every field has a default, so only the settings that differ need to be given:
///
/// ```
/// use weerdash::DashboardConfig;
/// use std::time::Duration;
///
/// let config = DashboardConfig::builder()
///     .cache_dir("/tmp/weerdash".into())
///     .memo_ttl(Duration::from_secs(60))
///     .build();
/// assert_eq!(config.disk_expiry, Duration::from_secs(3_600));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct DashboardConfig {
    /// Where parquet cache files are kept. `None` uses the system cache directory.
    pub cache_dir: Option<PathBuf>,
    #[builder(default = OPEN_METEO_HISTORICAL_URL.to_string(), into)]
    pub base_url: String,
    #[builder(default = ymd(2021, 1, 1))]
    pub start_date: NaiveDate,
    #[builder(default = ymd(2025, 1, 1))]
    pub end_date: NaiveDate,
    /// How long a file in the disk cache is served before it is fetched again.
    #[builder(default = Duration::from_secs(3_600))]
    pub disk_expiry: Duration,
    /// How long a built frame is kept in memory.
    #[builder(default = Duration::from_secs(3_600))]
    pub memo_ttl: Duration,
    #[builder(default = Duration::from_secs(30))]
    pub http_timeout: Duration,
    #[builder(default)]
    pub retry: RetryConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
