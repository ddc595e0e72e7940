//! Clear-sky solar radiation attenuated by cloud cover
//!
//! A simplified solar-position model: declination and hour angle give the
//! solar elevation at each interval midpoint, a clear-sky transmittance
//! scales the eccentricity-corrected solar constant, and cloud cover
//! attenuates the result. Hourly W/m² values integrate to MJ/m² over the
//! period.

use chrono::{Datelike, Duration, Timelike};
use std::f64::consts::PI;

use crate::data::eto::{CloudCoverInterval, SolarRadiationEstimator};
use crate::data::Coordinates;

/// Solar constant, W/m²
const SOLAR_CONSTANT: f64 = 1361.0;

const DEG: f64 = PI / 180.0;

/// Clear-sky fraction reaching the ground with the sun at the zenith
const CLEAR_SKY_TRANSMITTANCE: f64 = 0.75;

/// Default estimator fed to the ETo input builder
#[derive(Debug, Default, Clone, Copy)]
pub struct ClearSkyEstimator;

impl SolarRadiationEstimator for ClearSkyEstimator {
    fn estimate(&self, intervals: &[CloudCoverInterval], coordinates: Coordinates) -> f64 {
        let watt_hours: f64 = intervals
            .iter()
            .map(|interval| hourly_irradiance(interval, coordinates))
            .sum();

        // 1 Wh/m² = 3600 J/m²
        watt_hours * 3600.0 / 1.0e6
    }
}

/// Mean irradiance over one interval, W/m², evaluated at its midpoint
fn hourly_irradiance(interval: &CloudCoverInterval, coordinates: Coordinates) -> f64 {
    let midpoint = (interval.start + Duration::minutes(30)).naive_utc();
    let day_of_year = midpoint.ordinal() as f64;
    let utc_hour = midpoint.hour() as f64 + midpoint.minute() as f64 / 60.0;

    // Declination (Spencer 1971)
    let b = 2.0 * PI * (day_of_year - 1.0) / 365.0;
    let declination = 0.006918 - 0.399912 * b.cos() + 0.070257 * b.sin()
        - 0.006758 * (2.0 * b).cos()
        + 0.000907 * (2.0 * b).sin()
        - 0.002697 * (3.0 * b).cos()
        + 0.00148 * (3.0 * b).sin();

    // Hour angle from local solar time
    let solar_time = (utc_hour + coordinates.longitude / 15.0).rem_euclid(24.0);
    let hour_angle = 15.0 * (solar_time - 12.0) * DEG;

    let latitude = coordinates.latitude * DEG;
    let sin_elevation = latitude.sin() * declination.sin()
        + latitude.cos() * declination.cos() * hour_angle.cos();

    if sin_elevation <= 0.0 {
        return 0.0;
    }

    // Eccentricity-corrected extraterrestrial irradiance
    let extraterrestrial = SOLAR_CONSTANT * (1.0 + 0.033 * (2.0 * PI * day_of_year / 365.0).cos());
    let clear_sky = extraterrestrial * CLEAR_SKY_TRANSMITTANCE * sin_elevation;

    // Cloud attenuation (Kasten & Czeplak)
    let cloud = interval.cloud_cover.clamp(0.0, 1.0);
    clear_sky * (1.0 - 0.75 * cloud.powf(3.4))
}
