//! Open-Meteo hourly observation client
//!
//! This module fetches raw hourly weather records from the Open-Meteo
//! forecast API and zips the column-oriented response into ordered
//! [`RawHourlyRecord`]s. The aggregation layers never see provider JSON;
//! everything downstream works on the zipped records.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Coordinates, WeatherError};

/// Base URL for the Open-Meteo forecast API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly variables requested on every call
const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,dewpoint_2m,\
precipitation,windspeed_10m,cloudcover,weathercode,is_day";

/// One raw hourly observation as delivered by the provider
///
/// Optional fields reflect the provider's nulls. Which of them are mandatory
/// is the normalizer's concern, with one exception: either relative humidity
/// or dew point should be present, and when both are absent the hour carries
/// no humidity reading at all.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHourlyRecord {
    /// Observation hour, zoned to the offset the provider reported
    pub timestamp: DateTime<FixedOffset>,
    /// Temperature in °C
    pub temperature: Option<f64>,
    /// Relative humidity percent (0-100)
    pub relative_humidity: Option<f64>,
    /// Dew point in °C
    pub dew_point: Option<f64>,
    /// Precipitation in mm
    pub precipitation: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Cloud cover percent (0-100)
    pub cloud_cover: Option<f64>,
    /// WMO weather interpretation code
    pub weather_code: Option<u8>,
    /// Whether the hour falls between sunrise and sunset
    pub is_day: bool,
}

/// Client for fetching hourly records from the Open-Meteo API
#[derive(Debug, Clone, Default)]
pub struct OpenMeteoClient {
    client: Client,
}

impl OpenMeteoClient {
    /// Create a new OpenMeteoClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new OpenMeteoClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch hourly observations between two UTC hour bounds, inclusive
    ///
    /// Timestamps in the returned records carry a zero offset; the bounds
    /// select complete hours, so `[now-24h, now-1h]` yields the trailing
    /// 24-sample window.
    pub async fn fetch_hourly(
        &self,
        coordinates: Coordinates,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RawHourlyRecord>, WeatherError> {
        let url = format!(
            "{}?latitude={}&longitude={}&hourly={}&timezone=UTC&start_hour={}&end_hour={}",
            OPEN_METEO_BASE_URL,
            coordinates.latitude,
            coordinates.longitude,
            HOURLY_FIELDS,
            start.format("%Y-%m-%dT%H:%M"),
            end.format("%Y-%m-%dT%H:%M"),
        );

        self.fetch(&url).await
    }

    /// Fetch the hourly forecast for the given number of days
    ///
    /// Requests the provider's local timezone, so timestamps come back zoned
    /// to the location and day buckets align with local calendar days.
    pub async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        days: u8,
    ) -> Result<Vec<RawHourlyRecord>, WeatherError> {
        let url = format!(
            "{}?latitude={}&longitude={}&hourly={}&timezone=auto&forecast_days={}",
            OPEN_METEO_BASE_URL, coordinates.latitude, coordinates.longitude, HOURLY_FIELDS, days,
        );

        self.fetch(&url).await
    }

    async fn fetch(&self, url: &str) -> Result<Vec<RawHourlyRecord>, WeatherError> {
        debug!(%url, "requesting hourly weather");
        let response = self.client.get(url).send().await?;
        let text = response.text().await?;
        let body: OpenMeteoResponse = serde_json::from_str(&text)?;

        records_from_response(body)
    }
}

/// Zip the provider's parallel hourly arrays into ordered records
fn records_from_response(
    response: OpenMeteoResponse,
) -> Result<Vec<RawHourlyRecord>, WeatherError> {
    let hourly = response.hourly.ok_or(WeatherError::MissingField("hourly"))?;

    let len = hourly.time.len();
    if hourly.temperature_2m.len() != len
        || hourly.relativehumidity_2m.len() != len
        || hourly.dewpoint_2m.len() != len
        || hourly.precipitation.len() != len
        || hourly.windspeed_10m.len() != len
        || hourly.cloudcover.len() != len
        || hourly.weathercode.len() != len
        || hourly.is_day.len() != len
    {
        return Err(WeatherError::MissingField(
            "hourly arrays have inconsistent lengths",
        ));
    }
    if len == 0 {
        return Err(WeatherError::EmptyResponse);
    }

    let offset = FixedOffset::east_opt(response.utc_offset_seconds)
        .ok_or_else(|| WeatherError::InvalidTimeFormat(response.utc_offset_seconds.to_string()))?;

    let mut records = Vec::with_capacity(len);
    for i in 0..len {
        records.push(RawHourlyRecord {
            timestamp: parse_datetime(&hourly.time[i], offset)?,
            temperature: hourly.temperature_2m[i],
            relative_humidity: hourly.relativehumidity_2m[i],
            dew_point: hourly.dewpoint_2m[i],
            precipitation: hourly.precipitation[i],
            wind_speed: hourly.windspeed_10m[i],
            cloud_cover: hourly.cloudcover[i],
            weather_code: hourly.weathercode[i],
            is_day: hourly.is_day[i].map(|d| d != 0).unwrap_or(true),
        });
    }

    Ok(records)
}

/// Parse a provider datetime string (e.g., "2024-07-15T05:00") into the
/// response's local offset
fn parse_datetime(
    datetime_str: &str,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, WeatherError> {
    let naive = NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .map_err(|_| WeatherError::InvalidTimeFormat(datetime_str.to_string()))?;

    naive
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| WeatherError::InvalidTimeFormat(datetime_str.to_string()))
}

/// Open-Meteo API response structure
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    hourly: Option<HourlyBlock>,
}

/// Column-oriented hourly data from Open-Meteo
#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    relativehumidity_2m: Vec<Option<f64>>,
    dewpoint_2m: Vec<Option<f64>>,
    precipitation: Vec<Option<f64>>,
    windspeed_10m: Vec<Option<f64>>,
    cloudcover: Vec<Option<f64>>,
    weathercode: Vec<Option<u8>>,
    is_day: Vec<Option<u8>>,
}
