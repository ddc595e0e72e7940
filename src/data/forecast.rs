//! Forecast resampling into day buckets and current conditions
//!
//! Partitions a multi-day hourly sequence into contiguous 24-sample day
//! buckets, reduces each to a [`DailySummary`], and pins a
//! [`CurrentConditions`] snapshot to the most recently elapsed hour of the
//! first bucket.

use chrono::{DateTime, FixedOffset, NaiveTime};

use super::{CurrentConditions, DailySummary, HourlySample, WeatherError, WeatherIcon, WeatherSummary};

/// Forecast horizon requested when the caller does not override it
pub const DEFAULT_FORECAST_DAYS: u8 = 8;

/// Samples per day bucket
const BUCKET_LEN: usize = 24;

/// Index of the sample that supplies the bucket's date: a mid-bucket
/// instant robust to off-by-one boundary samples
const DATE_SAMPLE_INDEX: usize = 12;

/// Partition an hourly forecast into day buckets and summarize each
///
/// `now` pins the current-conditions snapshot to the most recently elapsed
/// hour of the first bucket. A trailing remainder too short to carry the
/// mid-bucket date sample is a partial day and is dropped.
pub fn summarize_forecast(
    origin: &'static str,
    samples: &[HourlySample],
    now: DateTime<FixedOffset>,
) -> Result<WeatherSummary, WeatherError> {
    let mut forecast = Vec::new();
    let mut current = None;

    for bucket in samples.chunks(BUCKET_LEN) {
        if bucket.len() <= DATE_SAMPLE_INDEX {
            break;
        }

        let day = summarize_bucket(bucket);
        if current.is_none() {
            current = Some(current_conditions(bucket, &day, now));
        }
        forecast.push(day);
    }

    let Some(current) = current else {
        return Err(WeatherError::EmptyResponse);
    };

    Ok(WeatherSummary {
        origin,
        current,
        forecast,
    })
}

/// Reduce one day bucket to its summary
fn summarize_bucket(bucket: &[HourlySample]) -> DailySummary {
    let first = &bucket[0];
    let mut temp_min = first.temperature;
    let mut temp_max = first.temperature;
    let mut precipitation = first.precipitation;

    // Day icon keeps the first departure from clear-day; any later
    // differing icon collapses the day back to clear-day for good.
    let mut icon = first.icon;
    let mut collapsed = false;

    for sample in &bucket[1..] {
        temp_min = temp_min.min(sample.temperature);
        temp_max = temp_max.max(sample.temperature);
        precipitation += sample.precipitation;

        if collapsed {
            // stays clear-day
        } else if icon == WeatherIcon::ClearDay {
            icon = sample.icon;
        } else if sample.icon != icon {
            icon = WeatherIcon::ClearDay;
            collapsed = true;
        }
    }

    DailySummary {
        date: start_of_day(bucket[DATE_SAMPLE_INDEX].timestamp),
        temp_min: temp_min.floor() as i32,
        temp_max: temp_max.floor() as i32,
        precipitation,
        icon,
    }
}

/// Snapshot of the latest elapsed hour within the first day bucket
///
/// Initialized from the bucket's first sample; every subsequent sample whose
/// timestamp is at or before `now` overwrites the instantaneous fields, so
/// the snapshot never reflects a forecast hour.
fn current_conditions(
    bucket: &[HourlySample],
    day: &DailySummary,
    now: DateTime<FixedOffset>,
) -> CurrentConditions {
    let mut latest = &bucket[0];
    for sample in &bucket[1..] {
        if sample.timestamp <= now {
            latest = sample;
        }
    }

    CurrentConditions {
        temperature: latest.temperature.floor() as i32,
        humidity: latest.humidity.map(|h| h.floor() as i32),
        wind: latest.wind.floor() as i32,
        icon: latest.icon,
        temp_min: day.temp_min,
        temp_max: day.temp_max,
        precipitation: day.precipitation,
    }
}

/// Local start of day for a zoned timestamp
fn start_of_day(timestamp: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let midnight = timestamp.date_naive().and_time(NaiveTime::MIN);
    match midnight.and_local_timezone(*timestamp.offset()) {
        chrono::LocalResult::Single(dt) => dt,
        // Fixed offsets are never ambiguous
        _ => timestamp,
    }
}
