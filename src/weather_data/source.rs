use crate::weather_data::error::WeatherDataError;
use crate::weather_data::request::WeatherRequest;
use crate::weather_data::response::ProviderResponse;
use std::future::Future;

/// Anything that can answer a [`WeatherRequest`].
///
/// [`crate::OpenMeteoClient`] talks to the Open-Meteo API; tests substitute an in-memory
/// source. Implementations return one response per location (a request names one), or none
/// when the provider has nothing. Retrying and caching are layered on top by the loader.
pub trait WeatherDataSource: Send + Sync {
    fn fetch(
        &self,
        request: &WeatherRequest,
    ) -> impl Future<Output = Result<Vec<ProviderResponse>, WeatherDataError>> + Send;
}
