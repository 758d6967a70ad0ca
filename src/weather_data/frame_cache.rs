use crate::types::frequency::Frequency;
use crate::types::location::Location;
use crate::weather_data::request::WeatherRequest;
use chrono::NaiveDate;
use log::debug;
use ordered_float::OrderedFloat;
use polars::prelude::DataFrame;
use std::collections::{hash_map::Entry, HashMap};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Identifies one memoised frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameKey {
    location: String,
    coordinates: (OrderedFloat<f64>, OrderedFloat<f64>),
    start_date: NaiveDate,
    end_date: NaiveDate,
    frequency: Frequency,
}

impl FrameKey {
    pub fn new(location: &Location, request: &WeatherRequest) -> Self {
        Self {
            location: location.name.clone(),
            coordinates: request.coordinates.key(),
            start_date: request.start_date,
            end_date: request.end_date,
            frequency: request.frequency,
        }
    }
}

struct CachedFrame {
    frame: DataFrame,
    inserted: Instant,
}

/// In-memory memo of built frames so repeated interactions don't refetch.
///
/// Entries live for `ttl`; an expired entry is dropped the next time it is looked up, or by
/// [`FrameCache::evict_expired`]. A zero `ttl` disables memoisation.
pub struct FrameCache {
    ttl: Duration,
    frames: Mutex<HashMap<FrameKey, CachedFrame>>,
}

impl FrameCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            frames: Mutex::new(HashMap::new()),
        }
    }

    fn is_fresh(&self, cached: &CachedFrame) -> bool {
        cached.inserted.elapsed() < self.ttl
    }

    pub async fn get(&self, key: &FrameKey) -> Option<DataFrame> {
        let mut frames = self.frames.lock().await;
        match frames.get(key).map(|cached| self.is_fresh(cached)) {
            Some(true) => frames.get(key).map(|cached| cached.frame.clone()),
            Some(false) => {
                debug!("Dropping expired frame for {:?}", key);
                frames.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `frame` under `key` and returns the frame to use.
    ///
    /// If another task stored a fresh frame for the same key in the meantime, that one is
    /// kept and returned instead. Expired entries of any key are dropped first.
    pub async fn insert(&self, key: FrameKey, frame: DataFrame) -> DataFrame {
        let mut frames = self.frames.lock().await;
        let ttl = self.ttl;
        frames.retain(|_, cached| cached.inserted.elapsed() < ttl);
        match frames.entry(key) {
            Entry::Occupied(mut entry) => {
                if self.is_fresh(entry.get()) {
                    entry.get().frame.clone()
                } else {
                    entry.insert(CachedFrame {
                        frame: frame.clone(),
                        inserted: Instant::now(),
                    });
                    frame
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(CachedFrame {
                    frame: frame.clone(),
                    inserted: Instant::now(),
                });
                frame
            }
        }
    }

    pub async fn invalidate(&self, key: &FrameKey) -> bool {
        self.frames.lock().await.remove(key).is_some()
    }

    /// Drops every expired entry, returning how many were removed.
    pub async fn evict_expired(&self) -> usize {
        let mut frames = self.frames.lock().await;
        let before = frames.len();
        let ttl = self.ttl;
        frames.retain(|_, cached| cached.inserted.elapsed() < ttl);
        let evicted = before - frames.len();
        if evicted > 0 {
            debug!("Evicted {} expired frames", evicted);
        }
        evicted
    }

    pub async fn clear(&self) {
        self.frames.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.frames.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
