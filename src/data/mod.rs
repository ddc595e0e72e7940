//! Core data models for the aquacast weather pipeline
//!
//! This module contains the data types shared across the fetch, normalization
//! and aggregation layers: canonical hourly samples, the result shapes handed
//! to the irrigation scheduler, and the error type every layer propagates.

pub mod aggregate;
pub mod eto;
pub mod forecast;
pub mod normalize;
pub mod openmeteo;

pub use openmeteo::{OpenMeteoClient, RawHourlyRecord};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A geographic query location in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude, -90 to 90
    pub latitude: f64,
    /// Longitude, -180 to 180
    pub longitude: f64,
}

/// Normalized icon vocabulary shared with the irrigation scheduler
///
/// Serializes to the kebab-case codes the scheduler displays ("clear-day",
/// "partly-cloudy-night", ...). The `Wind` icon exists for providers that
/// report a wind condition code; Open-Meteo's WMO table has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Fog,
    Wind,
    Hail,
    Sleet,
    Snow,
    Rain,
    Thunderstorm,
}

impl WeatherIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::ClearDay => "clear-day",
            WeatherIcon::ClearNight => "clear-night",
            WeatherIcon::PartlyCloudyDay => "partly-cloudy-day",
            WeatherIcon::PartlyCloudyNight => "partly-cloudy-night",
            WeatherIcon::Cloudy => "cloudy",
            WeatherIcon::Fog => "fog",
            WeatherIcon::Wind => "wind",
            WeatherIcon::Hail => "hail",
            WeatherIcon::Sleet => "sleet",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Thunderstorm => "thunderstorm",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unit-normalized, provider-independent hourly weather record
///
/// Immutable once produced by the normalizer; one per raw record, in the
/// same order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySample {
    /// Observation hour, zoned to the provider's reported offset
    pub timestamp: DateTime<FixedOffset>,
    /// Temperature in °F
    pub temperature: f64,
    /// Relative humidity percent (0-100), absent when the provider reported
    /// neither humidity nor dew point for this hour
    pub humidity: Option<f64>,
    /// Precipitation in inches
    pub precipitation: f64,
    /// Wind speed in mph
    pub wind: f64,
    /// Cloud cover fraction (0.0-1.0)
    pub cloud_cover: f64,
    /// Normalized sky-condition icon
    pub icon: WeatherIcon,
}

/// Trailing one-day summary consumed by the Zimmerman watering adjustment
///
/// Note: This struct only implements `Serialize` (not `Deserialize`) because
/// the origin tag is a static string reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WateringSummary {
    /// Weather provider that produced the underlying observations
    pub origin: &'static str,
    /// Mean temperature over the window, °F
    pub temperature: f64,
    /// Mean humidity over the samples that reported one; `None` when
    /// humidity was absent in every sample
    pub humidity: Option<f64>,
    /// Total precipitation over the window, inches
    pub precipitation: f64,
    /// Whether the chronologically last sample recorded precipitation
    pub raining: bool,
}

/// One forecast day, reduced from a 24-sample bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Start of the forecast day, provider-local
    pub date: DateTime<FixedOffset>,
    /// Lowest hourly temperature, floored °F
    pub temp_min: i32,
    /// Highest hourly temperature, floored °F
    pub temp_max: i32,
    /// Total precipitation across the bucket, inches (not floored)
    pub precipitation: f64,
    /// Representative icon for the day
    pub icon: WeatherIcon,
}

/// Snapshot of the most recently elapsed hour within today
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    /// Temperature, floored °F
    pub temperature: i32,
    /// Humidity percent, floored; absent when the latest elapsed hour had
    /// no humidity reading
    pub humidity: Option<i32>,
    /// Wind speed, floored mph
    pub wind: i32,
    /// Icon of the latest elapsed hour
    pub icon: WeatherIcon,
    /// Today's lowest temperature, floored °F
    pub temp_min: i32,
    /// Today's highest temperature, floored °F
    pub temp_max: i32,
    /// Today's total precipitation, inches
    pub precipitation: f64,
}

/// Current conditions plus the multi-day forecast
///
/// Note: This struct only implements `Serialize` (not `Deserialize`) because
/// the origin tag is a static string reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    /// Weather provider that produced the underlying observations
    pub origin: &'static str,
    pub current: CurrentConditions,
    pub forecast: Vec<DailySummary>,
}

/// Inputs for a reference-evapotranspiration estimate over a trailing day
///
/// Min/max fields are absent when the underlying value was missing in every
/// sample of the window, never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EToInputs {
    /// Weather provider that produced the underlying observations
    pub origin: &'static str,
    /// Timestamp of the first sample, UTC epoch seconds
    pub period_start: i64,
    /// Lowest hourly temperature, °F
    pub temp_min: Option<f64>,
    /// Highest hourly temperature, °F
    pub temp_max: Option<f64>,
    /// Lowest hourly humidity percent
    pub humidity_min: Option<f64>,
    /// Highest hourly humidity percent
    pub humidity_max: Option<f64>,
    /// Mean wind speed, mph
    pub wind: f64,
    /// Total precipitation, inches
    pub precipitation: f64,
    /// Estimated solar radiation, MJ/m² for the default estimator
    pub solar_radiation: f64,
}

/// Errors surfaced by the weather pipeline
///
/// Every failure propagates to the caller immediately; nothing is retried
/// or locally recovered.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed or timed out
    #[error("weather API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse the provider response body
    #[error("failed to parse provider response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response parsed but lacks an expected field
    #[error("missing expected field in response: {0}")]
    MissingField(&'static str),

    /// Response deserialized but contains no usable hourly data
    #[error("provider returned no hourly data")]
    EmptyResponse,

    /// A trailing-window aggregation received the wrong number of samples
    #[error("insufficient weather data: expected 23 or 24 hourly samples, got {0}")]
    InsufficientData(usize),

    /// A mandatory per-sample field was absent at normalization time
    #[error("hourly record at {timestamp} is missing {field}")]
    MissingObservation {
        field: &'static str,
        timestamp: DateTime<FixedOffset>,
    },

    /// Provider timestamp not in the expected format
    #[error("invalid time format: {0}")]
    InvalidTimeFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hour(h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 7, 15, h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_icon_serializes_to_kebab_case() {
        let json = serde_json::to_string(&WeatherIcon::PartlyCloudyNight).unwrap();
        assert_eq!(json, "\"partly-cloudy-night\"");

        let icon: WeatherIcon = serde_json::from_str("\"clear-day\"").unwrap();
        assert_eq!(icon, WeatherIcon::ClearDay);
    }

    #[test]
    fn test_icon_as_str_matches_serde_form() {
        let icons = [
            WeatherIcon::ClearDay,
            WeatherIcon::ClearNight,
            WeatherIcon::PartlyCloudyDay,
            WeatherIcon::PartlyCloudyNight,
            WeatherIcon::Cloudy,
            WeatherIcon::Fog,
            WeatherIcon::Wind,
            WeatherIcon::Hail,
            WeatherIcon::Sleet,
            WeatherIcon::Snow,
            WeatherIcon::Rain,
            WeatherIcon::Thunderstorm,
        ];

        for icon in icons {
            let json = serde_json::to_string(&icon).unwrap();
            assert_eq!(json, format!("\"{}\"", icon.as_str()));
        }
    }

    #[test]
    fn test_hourly_sample_creation() {
        let sample = HourlySample {
            timestamp: hour(14),
            temperature: 72.5,
            humidity: Some(65.0),
            precipitation: 0.04,
            wind: 7.8,
            cloud_cover: 0.25,
            icon: WeatherIcon::PartlyCloudyDay,
        };

        assert!((sample.temperature - 72.5).abs() < 0.01);
        assert_eq!(sample.humidity, Some(65.0));
        assert!((sample.cloud_cover - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_watering_summary_serialization() {
        let summary = WateringSummary {
            origin: "openmeteo",
            temperature: 50.0,
            humidity: Some(50.0),
            precipitation: 0.039,
            raining: true,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"origin\":\"openmeteo\""));
        assert!(json.contains("\"raining\":true"));
    }

    #[test]
    fn test_eto_inputs_absent_minmax_serializes_as_null() {
        let inputs = EToInputs {
            origin: "openmeteo",
            period_start: 1_721_000_000,
            temp_min: Some(48.0),
            temp_max: Some(75.0),
            humidity_min: None,
            humidity_max: None,
            wind: 4.5,
            precipitation: 0.0,
            solar_radiation: 22.1,
        };

        let json = serde_json::to_string(&inputs).unwrap();
        assert!(json.contains("\"humidity_min\":null"));
        assert!(json.contains("\"humidity_max\":null"));
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        let insufficient = WeatherError::InsufficientData(22);
        assert!(insufficient.to_string().contains("22"));

        let fault = WeatherError::MissingObservation {
            field: "temperature",
            timestamp: hour(3),
        };
        assert!(fault.to_string().contains("temperature"));

        let missing = WeatherError::MissingField("hourly");
        assert!(missing.to_string().contains("hourly"));
    }
}
