use crate::types::frequency::Frequency;
use crate::types::location::LatLon;
use chrono::NaiveDate;

/// A request for one location's weather over an inclusive date range.
///
/// The variables requested are those of the [`Frequency`], in its column order. Responses
/// must return one value array per variable in that same order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRequest {
    pub coordinates: LatLon,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: Frequency,
}

impl WeatherRequest {
    pub fn new(
        coordinates: LatLon,
        start_date: NaiveDate,
        end_date: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        Self {
            coordinates,
            start_date,
            end_date,
            frequency,
        }
    }

    pub fn variables(&self) -> &'static [&'static str] {
        self.frequency.variables()
    }

    /// File name of the on-disk cache entry for this request.
    pub(crate) fn cache_file_name(&self) -> String {
        format!(
            "{}{:.4}_{:.4}-{}-{}.parquet",
            self.frequency.cache_file_prefix(),
            self.coordinates.0,
            self.coordinates.1,
            self.start_date.format("%Y%m%d"),
            self.end_date.format("%Y%m%d"),
        )
    }
}
