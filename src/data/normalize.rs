//! Unit and field normalization for raw provider records
//!
//! Converts each [`RawHourlyRecord`] into one canonical [`HourlySample`]:
//! °C to °F, mm to inches, km/h to mph, cloud cover percent to a fraction,
//! and relative humidity either taken directly or derived from the dew point
//! via the Magnus approximation. A missing mandatory field is a data fault,
//! never a silent zero.

use chrono::{DateTime, FixedOffset};

use super::{HourlySample, RawHourlyRecord, WeatherError, WeatherIcon};

// Magnus dew-point approximation coefficients (Sonntag 1990)
const MAGNUS_K2: f64 = 17.62;
const MAGNUS_K3: f64 = 243.12;

/// Convert °C to °F
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 1.8 + 32.0
}

/// Convert millimeters to inches
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / 25.4
}

/// Convert km/h to mph
pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * 0.62
}

/// Normalize one raw hourly record into a canonical sample
pub fn normalize(record: &RawHourlyRecord) -> Result<HourlySample, WeatherError> {
    let temperature_c = require(record.temperature, "temperature", record.timestamp)?;
    let precipitation_mm = require(record.precipitation, "precipitation", record.timestamp)?;
    let wind_kmh = require(record.wind_speed, "wind speed", record.timestamp)?;
    let cloud_cover_pct = require(record.cloud_cover, "cloud cover", record.timestamp)?;

    Ok(HourlySample {
        timestamp: record.timestamp,
        temperature: celsius_to_fahrenheit(temperature_c),
        humidity: relative_humidity(temperature_c, record.relative_humidity, record.dew_point),
        precipitation: mm_to_inches(precipitation_mm),
        wind: kmh_to_mph(wind_kmh),
        cloud_cover: cloud_cover_pct / 100.0,
        icon: icon_for_code(record.weather_code, record.is_day),
    })
}

/// Normalize an ordered sequence of raw records, preserving order
pub fn normalize_all(records: &[RawHourlyRecord]) -> Result<Vec<HourlySample>, WeatherError> {
    records.iter().map(normalize).collect()
}

fn require(
    value: Option<f64>,
    field: &'static str,
    timestamp: DateTime<FixedOffset>,
) -> Result<f64, WeatherError> {
    value.ok_or(WeatherError::MissingObservation { field, timestamp })
}

/// Relative humidity for one hourly record, percent rounded to the nearest
/// integer
///
/// Prefers the directly reported value; falls back to the Magnus dew-point
/// approximation when only a dew point is available. Both inputs absent
/// yields `None` rather than a zero-coerced reading.
fn relative_humidity(
    temperature_c: f64,
    reported: Option<f64>,
    dew_point_c: Option<f64>,
) -> Option<f64> {
    if let Some(rh) = reported {
        return Some(rh.round());
    }

    dew_point_c.map(|td| {
        let saturation = |t: f64| (MAGNUS_K2 * t / (MAGNUS_K3 + t)).exp();
        (100.0 * saturation(td) / saturation(temperature_c)).round()
    })
}

/// Map a WMO weather interpretation code to the normalized icon vocabulary
///
/// WMO codes:
/// - 0: Clear sky
/// - 1-2: Partly cloudy
/// - 3: Overcast
/// - 45, 48: Fog
/// - 51-57: Drizzle (56-57 freezing)
/// - 61-67: Rain (66-67 freezing)
/// - 71-77: Snow
/// - 80-82: Rain showers
/// - 85-86: Snow showers
/// - 95: Thunderstorm
/// - 96, 99: Thunderstorm with hail
///
/// Absent or unmapped codes fall back to the clear-day icon.
pub fn icon_for_code(code: Option<u8>, is_day: bool) -> WeatherIcon {
    let Some(code) = code else {
        return WeatherIcon::ClearDay;
    };

    match code {
        0 => {
            if is_day {
                WeatherIcon::ClearDay
            } else {
                WeatherIcon::ClearNight
            }
        }
        1 | 2 => {
            if is_day {
                WeatherIcon::PartlyCloudyDay
            } else {
                WeatherIcon::PartlyCloudyNight
            }
        }
        3 => WeatherIcon::Cloudy,
        45 | 48 => WeatherIcon::Fog,
        51..=55 | 61..=65 | 80..=82 => WeatherIcon::Rain,
        56 | 57 | 66 | 67 => WeatherIcon::Sleet,
        71..=77 | 85 | 86 => WeatherIcon::Snow,
        95 => WeatherIcon::Thunderstorm,
        96 | 99 => WeatherIcon::Hail,
        _ => WeatherIcon::ClearDay,
    }
}
