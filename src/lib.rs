mod config;
mod dashboard;
mod error;
mod filtering;
mod time_series;
mod types;
mod utils;
mod weather_data;

pub use config::DashboardConfig;
pub use dashboard::*;
pub use error::DashboardError;
pub use filtering::{compute_bounds, RangeError, TemperatureFilterExt};

pub use time_series::axis::TimeAxis;
pub use time_series::builder::{build_frame, empty_frame};
pub use time_series::error::TimeSeriesError;
pub use time_series::variable::VariableSeries;

pub use types::frequency::*;
pub use types::location::{dutch_locations, LatLon, Location};
pub use types::location_frame::*;
pub use types::selection_range::SelectionRange;
pub use types::weather_condition::WeatherCondition;

pub use weather_data::data_loader::WeatherDataLoader;
pub use weather_data::error::WeatherDataError;
pub use weather_data::frame_cache::{FrameCache, FrameKey};
pub use weather_data::frame_fetcher::FrameFetcher;
pub use weather_data::open_meteo::{OpenMeteoClient, OPEN_METEO_HISTORICAL_URL};
pub use weather_data::request::WeatherRequest;
pub use weather_data::response::{frame_from_responses, ProviderResponse, VariableBlock};
pub use weather_data::response_cache::ResponseCache;
pub use weather_data::retry::{with_retry, RetryConfig};
pub use weather_data::source::WeatherDataSource;
