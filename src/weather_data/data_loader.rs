use crate::weather_data::error::WeatherDataError;
use crate::weather_data::request::WeatherRequest;
use crate::weather_data::response::frame_from_responses;
use crate::weather_data::response_cache::ResponseCache;
use crate::weather_data::retry::{with_retry, RetryConfig};
use crate::weather_data::source::WeatherDataSource;
use log::{debug, info, warn};
use polars::prelude::DataFrame;

/// Loads the frame for a request: from the disk cache when fresh, otherwise from the source
/// (with retries), writing the result back to the cache.
pub struct WeatherDataLoader<S> {
    source: S,
    cache: ResponseCache,
    retry: RetryConfig,
}

impl<S: WeatherDataSource> WeatherDataLoader<S> {
    pub fn new(source: S, cache: ResponseCache, retry: RetryConfig) -> Self {
        Self {
            source,
            cache,
            retry,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub async fn get_frame(&self, request: &WeatherRequest) -> Result<DataFrame, WeatherDataError> {
        if let Some(frame) = self.cache.get(request).await? {
            info!(
                "Cache hit for {} data at {:?}",
                request.frequency, request.coordinates
            );
            return Ok(frame);
        }
        warn!(
            "Cache miss for {} data at {:?}. Downloading and processing.",
            request.frequency, request.coordinates
        );

        let what = format!("{} request for {:?}", request.frequency, request.coordinates);
        let responses = with_retry(&self.retry, &what, || self.source.fetch(request)).await?;
        if let Some(first) = responses.first() {
            debug!(
                "Provider grid cell {:?} lies {:.1} km from {:?}",
                first.grid_coordinates(),
                first.grid_coordinates().distance_km(&request.coordinates),
                request.coordinates
            );
        }

        let frame = frame_from_responses(responses, request.frequency)?;
        // Nothing worth keeping for an hour if the provider had nothing.
        if frame.height() > 0 {
            self.cache.put(request, frame.clone()).await?;
        }
        Ok(frame)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::frequency::Frequency;
    use crate::types::location::LatLon;
    use crate::weather_data::response::tests::daily_response;
    use crate::weather_data::response::ProviderResponse;
    use chrono::NaiveDate;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Source answering from a queue of scripted results, then repeating `fallback`.
    pub struct ScriptedSource {
        script: Mutex<VecDeque<Result<Vec<ProviderResponse>, WeatherDataError>>>,
        fallback: Vec<ProviderResponse>,
        pub calls: AtomicUsize,
    }

    impl ScriptedSource {
        pub fn new(fallback: Vec<ProviderResponse>) -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                fallback,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn then(self, result: Result<Vec<ProviderResponse>, WeatherDataError>) -> Self {
            self.script.lock().unwrap().push_back(result);
            self
        }
    }

    impl WeatherDataSource for ScriptedSource {
        async fn fetch(
            &self,
            _request: &WeatherRequest,
        ) -> Result<Vec<ProviderResponse>, WeatherDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(self.fallback.clone()))
        }
    }

    impl WeatherDataLoader<ScriptedSource> {
        pub fn source_calls(&self) -> usize {
            self.source.calls.load(Ordering::SeqCst)
        }
    }

    fn request() -> WeatherRequest {
        WeatherRequest::new(
            LatLon(52.11, 5.1806),
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 3).unwrap(),
            Frequency::Daily,
        )
    }

    #[tokio::test]
    async fn test_miss_fetches_and_caches() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let source = ScriptedSource::new(vec![daily_response(&[(1.0, 4.0), (2.0, 5.0)])]);
        let loader = WeatherDataLoader::new(
            source,
            ResponseCache::new(dir.path(), Duration::from_secs(3_600)),
            RetryConfig::disabled(),
        );

        let first = loader.get_frame(&request()).await?;
        let second = loader.get_frame(&request()).await?;
        assert_eq!(first.height(), 2);
        assert!(first.equals_missing(&second));
        assert_eq!(loader.source_calls(), 1);
        assert!(loader.cache().path_for(&request()).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let source = ScriptedSource::new(vec![daily_response(&[(1.0, 4.0)])])
            .then(Err(WeatherDataError::Unavailable("503".into())));
        let loader = WeatherDataLoader::new(
            source,
            ResponseCache::new(dir.path(), Duration::from_secs(3_600)),
            RetryConfig::new(2, 1, 1),
        );

        let frame = loader.get_frame(&request()).await?;
        assert_eq!(frame.height(), 1);
        assert_eq!(loader.source_calls(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_result_is_not_cached() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let loader = WeatherDataLoader::new(
            ScriptedSource::new(Vec::new()),
            ResponseCache::new(dir.path(), Duration::from_secs(3_600)),
            RetryConfig::disabled(),
        );

        let frame = loader.get_frame(&request()).await?;
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.width(), 6);
        assert!(!loader.cache().path_for(&request()).exists());
        Ok(())
    }
}
