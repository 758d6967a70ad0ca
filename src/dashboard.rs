//! The main entry point: fetches location frames, computes the temperature bounds of a
//! selection and filters the selected locations by a user-picked range.

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::filtering::{compute_bounds, RangeError, TemperatureFilterExt};
use crate::types::frequency::Frequency;
use crate::types::location::{dutch_locations, Location};
use crate::types::location_frame::LocationFrame;
use crate::types::selection_range::SelectionRange;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use crate::weather_data::data_loader::WeatherDataLoader;
use crate::weather_data::frame_fetcher::FrameFetcher;
use crate::weather_data::open_meteo::OpenMeteoClient;
use crate::weather_data::request::WeatherRequest;
use crate::weather_data::response_cache::ResponseCache;
use crate::weather_data::source::WeatherDataSource;
use bon::bon;
use chrono::NaiveDate;
use futures_util::future::try_join_all;
use log::{debug, info};
use polars::prelude::DataFrame;

/// The weather dashboard core.
///
/// Holds the fixed set of [`Location`]s, a [`WeatherDataSource`] and two caches in front of
/// it: parquet files on disk and a memo of built frames in memory. Both expire, see
/// [`DashboardConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// # use weerdash::{Dashboard, DashboardError, LocationView};
/// # #[tokio::main]
/// # async fn main() -> Result<(), DashboardError> {
/// let dashboard = Dashboard::new().await?;
/// let comparison = dashboard
///     .compare()
///     .locations(&["De Bilt", "Maastricht"])
///     .call()
///     .await?;
///
/// // Narrow the full range down to days that stayed between 0 and 20 °C.
/// let selection = comparison.bounds().sub_range(0, 20)?;
/// for view in comparison.apply(&selection)? {
///     match view {
///         LocationView::Data { name, frame } => println!("{}: {} days", name, frame.height()),
///         LocationView::NoDataInRange { name } => println!("{}: no data in range", name),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct Dashboard<S = OpenMeteoClient> {
    fetcher: FrameFetcher<S>,
    locations: Vec<Location>,
    config: DashboardConfig,
}

impl Dashboard<OpenMeteoClient> {
    /// Creates a dashboard backed by Open-Meteo with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::CacheDirResolution`] if the system cache directory cannot
    /// be determined and [`DashboardError::CacheDirCreation`] if it cannot be created.
    pub async fn new() -> Result<Self, DashboardError> {
        Self::with_config(DashboardConfig::default()).await
    }

    /// Creates a dashboard backed by Open-Meteo, configured by `config`.
    pub async fn with_config(config: DashboardConfig) -> Result<Self, DashboardError> {
        let source = OpenMeteoClient::new(config.base_url.clone(), config.http_timeout)?;
        Self::with_source(source, config).await
    }
}

#[bon]
impl<S: WeatherDataSource> Dashboard<S> {
    /// Creates a dashboard that fetches its data from `source`.
    ///
    /// The cache directory is created if it does not exist yet.
    pub async fn with_source(source: S, config: DashboardConfig) -> Result<Self, DashboardError> {
        let cache_dir = match &config.cache_dir {
            Some(dir) => dir.clone(),
            None => get_cache_dir().map_err(DashboardError::CacheDirResolution)?,
        };
        ensure_cache_dir_exists(&cache_dir)
            .await
            .map_err(|e| DashboardError::CacheDirCreation(cache_dir.clone(), e))?;
        info!("Using cache directory {}", cache_dir.display());

        let loader = WeatherDataLoader::new(
            source,
            ResponseCache::new(&cache_dir, config.disk_expiry),
            config.retry.clone(),
        );
        Ok(Self {
            fetcher: FrameFetcher::new(loader, config.memo_ttl),
            locations: dutch_locations(),
            config,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The locations that can be compared, in display order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Looks up a location by its exact name.
    pub fn location(&self, name: &str) -> Result<&Location, DashboardError> {
        self.locations
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| DashboardError::UnknownLocation(name.to_string()))
    }

    /// Daily data of `name` over the configured date range.
    pub async fn location_frame(&self, name: &str) -> Result<LocationFrame, DashboardError> {
        let location = self.location(name)?;
        self.daily_frame(location, self.config.start_date, self.config.end_date)
            .await
    }

    /// Hourly `temperature_2m` of `name` over the configured date range.
    pub async fn hourly_frame(&self, name: &str) -> Result<DataFrame, DashboardError> {
        let location = self.location(name)?;
        let request = WeatherRequest::new(
            location.coordinates,
            self.config.start_date,
            self.config.end_date,
            Frequency::Hourly,
        );
        Ok(self.fetcher.get_frame(location, &request).await?)
    }

    async fn daily_frame(
        &self,
        location: &Location,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<LocationFrame, DashboardError> {
        let request =
            WeatherRequest::new(location.coordinates, start_date, end_date, Frequency::Daily);
        let frame = self.fetcher.get_frame(location, &request).await?;
        LocationFrame::new(frame)
    }

    /// Fetches the selected locations and computes the temperature bounds across them.
    ///
    /// Locations are fetched concurrently. A name given twice is fetched once.
    ///
    /// # Arguments
    ///
    /// * `.locations(&[&str])`: **Required.** Names of the locations to compare.
    /// * `.start_date(NaiveDate)` / `.end_date(NaiveDate)`: Optional. Override the configured
    ///   date range.
    ///
    /// # Errors
    ///
    /// * [`DashboardError::NoLocationSelected`] for an empty selection.
    /// * [`DashboardError::UnknownLocation`] if a name is not one of [`Dashboard::locations`].
    /// * [`DashboardError::Range`] with [`RangeError::NoTemperatureData`] if no selected
    ///   location has a single temperature reading.
    /// * Any fetch or cache error of the individual locations.
    #[builder]
    pub async fn compare(
        &self,
        locations: &[&str],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Comparison, DashboardError> {
        if locations.is_empty() {
            return Err(DashboardError::NoLocationSelected);
        }
        let start_date = start_date.unwrap_or(self.config.start_date);
        let end_date = end_date.unwrap_or(self.config.end_date);

        let mut selected: Vec<&Location> = Vec::with_capacity(locations.len());
        for name in locations {
            let location = self.location(name)?;
            if !selected.iter().any(|l| l.name == location.name) {
                selected.push(location);
            }
        }

        let frames = try_join_all(selected.into_iter().map(|location| async move {
            let frame = self.daily_frame(location, start_date, end_date).await?;
            Ok::<_, DashboardError>((location.name.clone(), frame))
        }))
        .await?;

        let bounds = compute_bounds(frames.iter().map(|(_, frame)| frame))?;
        debug!("Temperature bounds across {} locations: {}", frames.len(), bounds);
        Ok(Comparison { frames, bounds })
    }

    /// Empties both caches, returning the number of files removed from disk.
    pub async fn clear_cache(&self) -> Result<usize, DashboardError> {
        Ok(self.fetcher.clear_cache().await?)
    }

    /// Drops expired frames from the in-memory memo.
    pub async fn evict_expired(&self) -> usize {
        self.fetcher.evict_expired().await
    }
}

/// The fetched frames of a selection together with their temperature bounds.
#[derive(Debug, Clone)]
pub struct Comparison {
    frames: Vec<(String, LocationFrame)>,
    bounds: SelectionRange,
}

impl Comparison {
    /// Integer range covering every temperature of the selection; the widest range a user
    /// can pick.
    pub fn bounds(&self) -> SelectionRange {
        self.bounds
    }

    pub fn frames(&self) -> impl Iterator<Item = (&str, &LocationFrame)> {
        self.frames.iter().map(|(name, frame)| (name.as_str(), frame))
    }

    pub fn frame(&self, name: &str) -> Option<&LocationFrame> {
        self.frames
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, frame)| frame)
    }

    /// Filters every location by `selection`, keeping selection order.
    ///
    /// A location left without rows becomes [`LocationView::NoDataInRange`]; the others are
    /// unaffected.
    pub fn apply(&self, selection: &SelectionRange) -> Result<Vec<LocationView>, RangeError> {
        self.frames
            .iter()
            .map(|(name, frame)| {
                let filtered = frame.filter_temperature(selection)?;
                Ok(if filtered.is_empty() {
                    LocationView::NoDataInRange { name: name.clone() }
                } else {
                    LocationView::Data {
                        name: name.clone(),
                        frame: filtered,
                    }
                })
            })
            .collect()
    }
}

/// What the dashboard shows for one location after filtering.
#[derive(Debug, Clone)]
pub enum LocationView {
    Data { name: String, frame: LocationFrame },
    NoDataInRange { name: String },
}

impl LocationView {
    pub fn name(&self) -> &str {
        match self {
            LocationView::Data { name, .. } | LocationView::NoDataInRange { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_series::variable::VariableSeries;
    use crate::types::location::LatLon;
    use crate::weather_data::error::WeatherDataError;
    use crate::weather_data::response::tests::{daily_response, JAN_1_2021};
    use crate::weather_data::response::{ProviderResponse, VariableBlock};
    use crate::weather_data::retry::RetryConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers with canned responses per latitude; unknown coordinates get no responses.
    struct FakeSource {
        responses: Vec<(f64, Vec<ProviderResponse>)>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(responses: Vec<(LatLon, Vec<ProviderResponse>)>) -> Self {
            Self {
                responses: responses.into_iter().map(|(c, r)| (c.0, r)).collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl WeatherDataSource for FakeSource {
        async fn fetch(
            &self,
            request: &WeatherRequest,
        ) -> Result<Vec<ProviderResponse>, WeatherDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .responses
                .iter()
                .find(|(lat, _)| *lat == request.coordinates.0)
                .map(|(_, r)| r.clone())
                .unwrap_or_default())
        }
    }

    fn coordinates(name: &str) -> LatLon {
        dutch_locations()
            .into_iter()
            .find(|l| l.name == name)
            .map(|l| l.coordinates)
            .unwrap()
    }

    async fn dashboard(
        dir: &tempfile::TempDir,
        source: FakeSource,
    ) -> Result<Dashboard<FakeSource>, DashboardError> {
        let config = DashboardConfig::builder()
            .cache_dir(dir.path().to_path_buf())
            .retry(RetryConfig::disabled())
            .build();
        Dashboard::with_source(source, config).await
    }

    fn two_locations() -> FakeSource {
        FakeSource::new(vec![
            (
                coordinates("De Bilt"),
                vec![daily_response(&[(-8.0, 3.0), (2.0, 15.0)])],
            ),
            (
                coordinates("Leeuwarden"),
                vec![daily_response(&[(-2.5, 9.4)])],
            ),
        ])
    }

    #[tokio::test]
    async fn test_compare_and_apply() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let dashboard = dashboard(&dir, two_locations()).await?;

        let comparison = dashboard
            .compare()
            .locations(&["De Bilt", "Leeuwarden"])
            .call()
            .await?;
        assert_eq!(comparison.bounds(), SelectionRange::new(-8, 15)?);
        assert_eq!(comparison.frame("De Bilt").map(|f| f.height()), Some(2));

        let views = comparison.apply(&comparison.bounds().sub_range(-3, 10)?)?;
        assert_eq!(views.len(), 2);
        assert!(matches!(&views[0], LocationView::NoDataInRange { name } if name == "De Bilt"));
        match &views[1] {
            LocationView::Data { name, frame } => {
                assert_eq!(name, "Leeuwarden");
                assert_eq!(frame.height(), 1);
            }
            other => panic!("unexpected view {:?}", other),
        }

        let all = comparison.apply(&comparison.bounds())?;
        assert!(all.iter().all(|v| matches!(v, LocationView::Data { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_compare_deduplicates_and_memoises() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let dashboard = dashboard(&dir, two_locations()).await?;

        let comparison = dashboard
            .compare()
            .locations(&["De Bilt", "De Bilt"])
            .call()
            .await?;
        assert_eq!(comparison.frames().count(), 1);

        dashboard.location_frame("De Bilt").await?;
        assert_eq!(dashboard.fetcher.loader().source().calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_compare_errors() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let dashboard = dashboard(&dir, two_locations()).await?;

        assert!(matches!(
            dashboard.compare().locations(&[]).call().await,
            Err(DashboardError::NoLocationSelected)
        ));
        assert!(matches!(
            dashboard.compare().locations(&["Utrecht"]).call().await,
            Err(DashboardError::UnknownLocation(name)) if name == "Utrecht"
        ));
        // Nothing canned for Zandvoort, so its frame is empty.
        assert!(matches!(
            dashboard.compare().locations(&["Zandvoort"]).call().await,
            Err(DashboardError::Range(RangeError::NoTemperatureData))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_location_next_to_data() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let dashboard = dashboard(&dir, two_locations()).await?;

        let comparison = dashboard
            .compare()
            .locations(&["Zandvoort", "Leeuwarden"])
            .call()
            .await?;
        assert_eq!(comparison.bounds(), SelectionRange::new(-3, 10)?);
        let views = comparison.apply(&comparison.bounds())?;
        assert_eq!(views[0].name(), "Zandvoort");
        assert!(matches!(views[0], LocationView::NoDataInRange { .. }));
        assert!(matches!(views[1], LocationView::Data { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_hourly_frame() -> Result<(), Box<dyn std::error::Error>> {
        let mut response = daily_response(&[]);
        response.daily = None;
        response.hourly = Some(VariableBlock::new(
            JAN_1_2021,
            JAN_1_2021 + 3 * 3_600,
            3_600,
            vec![VariableSeries::from_f64("temperature_2m", &[1.0, f64::NAN, 2.0])],
        ));
        let source = FakeSource::new(vec![(coordinates("Maastricht"), vec![response])]);
        let dir = tempfile::tempdir()?;
        let dashboard = dashboard(&dir, source).await?;

        let frame = dashboard.hourly_frame("Maastricht").await?;
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.column("temperature_2m")?.null_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_cache() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let dashboard = dashboard(&dir, two_locations()).await?;

        dashboard.location_frame("Leeuwarden").await?;
        assert_eq!(dashboard.clear_cache().await?, 1);
        dashboard.location_frame("Leeuwarden").await?;
        assert_eq!(dashboard.fetcher.loader().source().calls.load(Ordering::SeqCst), 2);
        Ok(())
    }
}
