use crate::types::location::Location;
use crate::weather_data::data_loader::WeatherDataLoader;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::frame_cache::{FrameCache, FrameKey};
use crate::weather_data::request::WeatherRequest;
use crate::weather_data::source::WeatherDataSource;
use polars::prelude::DataFrame;
use std::time::Duration;

/// Memoised front of a [`WeatherDataLoader`].
///
/// The slow path (disk cache, network) runs outside the memo lock. If two callers race for
/// the same key, the first frame stored is the one both end up with.
pub struct FrameFetcher<S> {
    loader: WeatherDataLoader<S>,
    frames: FrameCache,
}

impl<S: WeatherDataSource> FrameFetcher<S> {
    pub fn new(loader: WeatherDataLoader<S>, ttl: Duration) -> Self {
        Self {
            loader,
            frames: FrameCache::new(ttl),
        }
    }

    pub fn loader(&self) -> &WeatherDataLoader<S> {
        &self.loader
    }

    pub async fn get_frame(
        &self,
        location: &Location,
        request: &WeatherRequest,
    ) -> Result<DataFrame, WeatherDataError> {
        let key = FrameKey::new(location, request);
        if let Some(frame) = self.frames.get(&key).await {
            return Ok(frame);
        }

        let loaded = self.loader.get_frame(request).await?;
        Ok(self.frames.insert(key, loaded).await)
    }

    /// Drops memoised frames and every file in the disk cache.
    pub async fn clear_cache(&self) -> Result<usize, WeatherDataError> {
        self.frames.clear().await;
        self.loader.cache().clear().await
    }

    pub async fn evict_expired(&self) -> usize {
        self.frames.evict_expired().await
    }
}
