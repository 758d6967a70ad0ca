//! [`WeatherDataSource`] backed by the Open-Meteo historical forecast API.

use crate::time_series::error::TimeSeriesError;
use crate::time_series::variable::VariableSeries;
use crate::types::frequency::Frequency;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::request::WeatherRequest;
use crate::weather_data::response::{ProviderResponse, VariableBlock};
use crate::weather_data::source::WeatherDataSource;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

pub const OPEN_METEO_HISTORICAL_URL: &str =
    "https://historical-forecast-api.open-meteo.com/v1/forecast";

/// HTTP client for the Open-Meteo API.
///
/// Requests use `timeformat=unixtime` and `timezone=GMT`, so every timestamp is UTC.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    client: Client,
}

impl OpenMeteoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherDataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WeatherDataError::HttpClient)?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn query(request: &WeatherRequest) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", request.coordinates.0.to_string()),
            ("longitude", request.coordinates.1.to_string()),
            ("start_date", request.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", request.end_date.format("%Y-%m-%d").to_string()),
            (
                request.frequency.path_segment(),
                request.variables().join(","),
            ),
            ("timeformat", "unixtime".to_string()),
            ("timezone", "GMT".to_string()),
        ]
    }
}

impl WeatherDataSource for OpenMeteoClient {
    async fn fetch(
        &self,
        request: &WeatherRequest,
    ) -> Result<Vec<ProviderResponse>, WeatherDataError> {
        let url = self.base_url.clone();
        info!(
            "Requesting {} data for {:?} from {}",
            request.frequency, request.coordinates, url
        );

        let response = self
            .client
            .get(&url)
            .query(&Self::query(request))
            .send()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    WeatherDataError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    WeatherDataError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e))?;
        parse_payload(&body, request)
            .map_err(|e| match e {
                ParseError::Json(source) => WeatherDataError::JsonParse { url, source },
                ParseError::Data(e) => e,
            })
    }
}

enum ParseError {
    Json(serde_json::Error),
    Data(WeatherDataError),
}

/// A single location's response, or an array when several coordinates were requested.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Many(Vec<RawResponse>),
    One(Box<RawResponse>),
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    elevation: Option<f64>,
    #[serde(default)]
    utc_offset_seconds: i32,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    daily: Option<RawBlock>,
    #[serde(default)]
    hourly: Option<RawBlock>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    time: Vec<i64>,
    #[serde(flatten)]
    values: HashMap<String, Vec<Value>>,
}

fn parse_payload(
    body: &str,
    request: &WeatherRequest,
) -> Result<Vec<ProviderResponse>, ParseError> {
    let payload: Payload = serde_json::from_str(body).map_err(ParseError::Json)?;
    let raw = match payload {
        Payload::Many(all) => all,
        Payload::One(one) => vec![*one],
    };
    raw.into_iter()
        .map(|r| r.into_response(request.frequency).map_err(ParseError::Data))
        .collect()
}

impl RawResponse {
    fn into_response(self, frequency: Frequency) -> Result<ProviderResponse, WeatherDataError> {
        let (daily, hourly) = match frequency {
            Frequency::Daily => (
                self.daily.map(|b| b.into_block(frequency)).transpose()?,
                None,
            ),
            Frequency::Hourly => (
                None,
                self.hourly.map(|b| b.into_block(frequency)).transpose()?,
            ),
        };
        Ok(ProviderResponse {
            latitude: self.latitude,
            longitude: self.longitude,
            elevation: self.elevation,
            utc_offset_seconds: self.utc_offset_seconds,
            timezone: self.timezone,
            daily,
            hourly,
        })
    }
}

impl RawBlock {
    /// Converts the `time` array into start/end/interval metadata and picks the requested
    /// variables in request order.
    fn into_block(mut self, frequency: Frequency) -> Result<VariableBlock, WeatherDataError> {
        let interval = match self.time.as_slice() {
            [first, second, ..] => second.checked_sub(*first),
            _ => Some(frequency.interval_seconds()),
        };
        let interval = match interval {
            Some(interval) if interval > 0 => interval,
            _ => {
                return Err(WeatherDataError::IrregularTimeAxis {
                    frequency,
                    index: 1,
                })
            }
        };
        if let Some(index) = self
            .time
            .windows(2)
            .position(|w| w[1].checked_sub(w[0]) != Some(interval))
        {
            return Err(WeatherDataError::IrregularTimeAxis {
                frequency,
                index: index + 1,
            });
        }
        let start = self.time.first().copied().unwrap_or(0);
        let end = match self.time.last() {
            Some(&last) => last
                .checked_add(interval)
                .ok_or(TimeSeriesError::TimestampOutOfRange(last))?,
            None => start,
        };

        let variables = frequency
            .variables()
            .iter()
            .map(|name| {
                self.values
                    .remove(*name)
                    .map(|values| VariableSeries::from_json(*name, &values))
                    .ok_or_else(|| WeatherDataError::MissingVariable {
                        frequency,
                        variable: name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(VariableBlock::new(start, end, interval, variables))
    }
}
