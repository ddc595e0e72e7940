//! ETo input assembly for evapotranspiration estimates
//!
//! Reduces the trailing 24-hour window into the inputs a reference-ET
//! calculation consumes, and hands per-hour cloud-cover intervals to an
//! opaque solar-radiation estimator.

use chrono::{DateTime, Duration, FixedOffset};

use super::aggregate::{check_window, min_max};
use super::{Coordinates, EToInputs, HourlySample, WeatherError};

/// One hour of cloud-cover observation handed to the solar estimator
#[derive(Debug, Clone, PartialEq)]
pub struct CloudCoverInterval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// Cloud cover fraction (0.0-1.0)
    pub cloud_cover: f64,
}

/// Approximates solar radiation from cloud-cover intervals and location
///
/// Opaque to the ETo builder; implementations live elsewhere.
pub trait SolarRadiationEstimator {
    fn estimate(&self, intervals: &[CloudCoverInterval], coordinates: Coordinates) -> f64;
}

/// Build per-hour cloud-cover intervals for a sample window
pub fn cloud_cover_intervals(samples: &[HourlySample]) -> Vec<CloudCoverInterval> {
    samples
        .iter()
        .map(|s| CloudCoverInterval {
            start: s.timestamp,
            end: s.timestamp + Duration::hours(1),
            cloud_cover: s.cloud_cover,
        })
        .collect()
}

/// Assemble the inputs consumed by a reference-ET estimate over a trailing
/// 24-hour window
pub fn build_eto_inputs(
    origin: &'static str,
    samples: &[HourlySample],
    coordinates: Coordinates,
    estimator: &dyn SolarRadiationEstimator,
) -> Result<EToInputs, WeatherError> {
    check_window(samples)?;

    let (temp_min, temp_max) = min_max(samples.iter().map(|s| Some(s.temperature)));
    let (humidity_min, humidity_max) = min_max(samples.iter().map(|s| s.humidity));

    let count = samples.len() as f64;
    let wind = samples.iter().map(|s| s.wind).sum::<f64>() / count;
    let precipitation = samples.iter().map(|s| s.precipitation).sum();

    let intervals = cloud_cover_intervals(samples);
    let solar_radiation = estimator.estimate(&intervals, coordinates);

    Ok(EToInputs {
        origin,
        period_start: samples[0].timestamp.timestamp(),
        temp_min,
        temp_max,
        humidity_min,
        humidity_max,
        wind,
        precipitation,
        solar_radiation,
    })
}
