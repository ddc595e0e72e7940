//! Trailing-window scalar reductions
//!
//! Reduces a nominal 24-hour window of canonical samples into the averages
//! and totals consumed by the watering adjustment, plus the null-tolerant
//! min/max reduction shared with the ETo path.

use super::{HourlySample, WateringSummary, WeatherError};

/// Validate that a nominal 24-hour trailing window really covers a day
///
/// 23 samples occur once a year when a daylight-saving transition drops an
/// hour; any other count indicates a partial provider outage and would
/// silently skew the averages.
pub fn check_window(samples: &[HourlySample]) -> Result<(), WeatherError> {
    if matches!(samples.len(), 23 | 24) {
        Ok(())
    } else {
        Err(WeatherError::InsufficientData(samples.len()))
    }
}

/// Null-tolerant min/max over optional values
///
/// Accumulators stay absent until the first present value; absent candidates
/// never poison the result with a false zero. All-absent input yields
/// `(None, None)`.
pub fn min_max<I>(values: I) -> (Option<f64>, Option<f64>)
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;

    for value in values.into_iter().flatten() {
        min = Some(match min {
            Some(current) => current.min(value),
            None => value,
        });
        max = Some(match max {
            Some(current) => current.max(value),
            None => value,
        });
    }

    (min, max)
}

/// Reduce a trailing 24-hour window into the summary consumed by the
/// Zimmerman watering adjustment
pub fn watering_summary(
    origin: &'static str,
    samples: &[HourlySample],
) -> Result<WateringSummary, WeatherError> {
    check_window(samples)?;

    let count = samples.len() as f64;
    let temperature = samples.iter().map(|s| s.temperature).sum::<f64>() / count;

    let reported: Vec<f64> = samples.iter().filter_map(|s| s.humidity).collect();
    let humidity = if reported.is_empty() {
        None
    } else {
        Some(reported.iter().sum::<f64>() / reported.len() as f64)
    };

    let precipitation = samples.iter().map(|s| s.precipitation).sum();
    let raining = samples.last().is_some_and(|s| s.precipitation > 0.0);

    Ok(WateringSummary {
        origin,
        temperature,
        humidity,
        precipitation,
        raining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalize::normalize_all;
    use crate::data::{RawHourlyRecord, WeatherIcon};
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};

    fn hour(h: i64) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 7, 15, 0, 0, 0)
            .unwrap()
            + Duration::hours(h)
    }

    fn sample(h: i64, temperature: f64) -> HourlySample {
        HourlySample {
            timestamp: hour(h),
            temperature,
            humidity: Some(50.0),
            precipitation: 0.0,
            wind: 5.0,
            cloud_cover: 0.5,
            icon: WeatherIcon::ClearDay,
        }
    }

    fn window(len: i64) -> Vec<HourlySample> {
        (0..len).map(|h| sample(h, 60.0)).collect()
    }

    #[test]
    fn test_window_guard_accepts_23_and_24() {
        assert!(check_window(&window(23)).is_ok());
        assert!(check_window(&window(24)).is_ok());
    }

    #[test]
    fn test_window_guard_rejects_other_counts() {
        for len in [0, 1, 22, 25, 48] {
            match check_window(&window(len)) {
                Err(WeatherError::InsufficientData(n)) => assert_eq!(n, len as usize),
                other => panic!("expected InsufficientData for {}, got {:?}", len, other),
            }
        }
    }

    #[test]
    fn test_mean_temperature_is_arithmetic_mean() {
        // Linear ramp 40..63 over 24 hours: mean is (40 + 63) / 2
        let samples: Vec<HourlySample> =
            (0..24).map(|h| sample(h, 40.0 + h as f64)).collect();

        let summary = watering_summary("openmeteo", &samples).unwrap();
        assert!((summary.temperature - 51.5).abs() < 1e-9);
    }

    #[test]
    fn test_mean_is_linear_in_each_sample() {
        let mut samples = window(24);
        let base = watering_summary("openmeteo", &samples).unwrap().temperature;

        // Raising one sample by 24 °F raises the mean by exactly 1 °F
        samples[7].temperature += 24.0;
        let shifted = watering_summary("openmeteo", &samples).unwrap().temperature;
        assert!((shifted - base - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_humidity_skips_absent_samples() {
        let mut samples = window(24);
        for s in samples.iter_mut().take(12) {
            s.humidity = None;
        }
        for s in samples.iter_mut().skip(12) {
            s.humidity = Some(80.0);
        }

        let summary = watering_summary("openmeteo", &samples).unwrap();
        assert_eq!(summary.humidity, Some(80.0));
    }

    #[test]
    fn test_mean_humidity_absent_when_no_sample_reports_one() {
        let mut samples = window(24);
        for s in samples.iter_mut() {
            s.humidity = None;
        }

        let summary = watering_summary("openmeteo", &samples).unwrap();
        assert_eq!(summary.humidity, None);
    }

    #[test]
    fn test_min_max_ignores_absent_values() {
        let (min, max) = min_max([Some(3.0), None, Some(-1.0), Some(7.0), None]);
        assert_eq!(min, Some(-1.0));
        assert_eq!(max, Some(7.0));
    }

    #[test]
    fn test_min_max_all_absent_yields_absent() {
        let (min, max) = min_max([None, None, None]);
        assert_eq!(min, None);
        assert_eq!(max, None);

        let (min, max) = min_max(std::iter::empty::<Option<f64>>());
        assert_eq!(min, None);
        assert_eq!(max, None);
    }

    #[test]
    fn test_raining_reflects_last_sample_only() {
        let mut samples = window(24);
        samples[0].precipitation = 0.5;
        let summary = watering_summary("openmeteo", &samples).unwrap();
        assert!(!summary.raining);

        samples[23].precipitation = 0.01;
        let summary = watering_summary("openmeteo", &samples).unwrap();
        assert!(summary.raining);
    }

    #[test]
    fn test_watering_summary_end_to_end() {
        // 24 raw hours at 10 °C / 50 % humidity, dry except 1 mm in the
        // final hour.
        let records: Vec<RawHourlyRecord> = (0..24)
            .map(|h| RawHourlyRecord {
                timestamp: hour(h),
                temperature: Some(10.0),
                relative_humidity: Some(50.0),
                dew_point: None,
                precipitation: Some(if h == 23 { 1.0 } else { 0.0 }),
                wind_speed: Some(10.0),
                cloud_cover: Some(0.0),
                weather_code: Some(0),
                is_day: true,
            })
            .collect();

        let samples = normalize_all(&records).unwrap();
        let summary = watering_summary("openmeteo", &samples).unwrap();

        assert!((summary.temperature - 50.0).abs() < 1e-9);
        assert_eq!(summary.humidity, Some(50.0));
        assert!((summary.precipitation - 1.0 / 25.4).abs() < 1e-9);
        assert!(summary.raining);
    }
}
