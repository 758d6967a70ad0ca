use crate::types::frequency::Frequency;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::request::WeatherRequest;
use log::{debug, info};
use polars::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::{fs, task};

/// On-disk cache of built frames, one parquet file per request.
///
/// An entry is served while it is younger than `expiry`; older entries are treated as
/// missing and overwritten by the next successful fetch.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    cache_dir: PathBuf,
    expiry: Duration,
}

impl ResponseCache {
    pub fn new(cache_dir: &Path, expiry: Duration) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            expiry,
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn path_for(&self, request: &WeatherRequest) -> PathBuf {
        self.cache_dir.join(request.cache_file_name())
    }

    /// Returns the cached frame for `request` if a fresh entry exists.
    pub async fn get(&self, request: &WeatherRequest) -> Result<Option<DataFrame>, WeatherDataError> {
        let path = self.path_for(request);
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(WeatherDataError::CacheMetadataRead(path, e)),
        };
        let modified = metadata
            .modified()
            .map_err(|e| WeatherDataError::CacheMetadataRead(path.clone(), e))?;
        // A modification time in the future counts as brand new.
        let age = modified.elapsed().unwrap_or_default();
        if age >= self.expiry {
            debug!("Cache entry {:?} expired ({:?} old)", path, age);
            return Ok(None);
        }

        let frame = task::spawn_blocking(move || {
            let file = std::fs::File::open(&path)
                .map_err(|e| WeatherDataError::ParquetReadIo(path.clone(), e))?;
            ParquetReader::new(file)
                .finish()
                .map_err(|e| WeatherDataError::ParquetReadPolars(path, e))
        })
        .await??;
        Ok(Some(frame))
    }

    /// Writes `frame` as the entry for `request`, replacing any previous one atomically.
    pub async fn put(&self, request: &WeatherRequest, mut frame: DataFrame) -> Result<(), WeatherDataError> {
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| WeatherDataError::CacheDirCreation(self.cache_dir.clone(), e))?;

        let path = self.path_for(request);
        let dir = self.cache_dir.clone();
        let written = path.clone();
        task::spawn_blocking(move || {
            let mut temp_file = NamedTempFile::new_in(&dir)
                .map_err(|e| WeatherDataError::ParquetWriteIo(path.clone(), e))?;
            ParquetWriter::new(temp_file.as_file_mut())
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut frame)
                .map_err(|e| WeatherDataError::ParquetWritePolars(path.clone(), e))?;
            temp_file
                .persist(&path)
                .map_err(|e| WeatherDataError::ParquetWriteIo(path.clone(), e.error))?;
            Ok::<(), WeatherDataError>(())
        })
        .await??;
        info!("Cached {} data to {:?}", request.frequency, written);
        Ok(())
    }

    /// Deletes every cached entry, returning how many files were removed.
    pub async fn clear(&self) -> Result<usize, WeatherDataError> {
        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(WeatherDataError::CacheDeletionError(self.cache_dir.clone(), e)),
        };

        let prefixes = [
            Frequency::Daily.cache_file_prefix(),
            Frequency::Hourly.cache_file_prefix(),
        ];
        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| WeatherDataError::CacheDeletionError(self.cache_dir.clone(), e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".parquet") && prefixes.iter().any(|p| name.starts_with(p.as_str())) {
                let path = entry.path();
                fs::remove_file(&path)
                    .await
                    .map_err(|e| WeatherDataError::CacheDeletionError(path.clone(), e))?;
                removed += 1;
            }
        }
        info!("Removed {} cache files from {:?}", removed, self.cache_dir);
        Ok(removed)
    }
}
