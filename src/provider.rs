//! Weather provider capability interface
//!
//! Aggregates are exposed behind a small capability trait so the scheduler
//! can dispatch to any weather-provider variant. [`OpenMeteoProvider`] is
//! the built-in implementation: each call performs exactly one fetch, then
//! runs the aggregation synchronously over the returned records. Nothing is
//! cached or retried; every failure propagates immediately.

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::data::aggregate::watering_summary;
use crate::data::eto::{build_eto_inputs, SolarRadiationEstimator};
use crate::data::forecast::{summarize_forecast, DEFAULT_FORECAST_DAYS};
use crate::data::normalize::normalize_all;
use crate::data::{
    Coordinates, EToInputs, OpenMeteoClient, WateringSummary, WeatherError, WeatherSummary,
};

/// Origin tag attached to every aggregate produced by [`OpenMeteoProvider`]
pub const OPEN_METEO_ORIGIN: &str = "openmeteo";

/// Capability interface shared by weather-provider variants
#[allow(async_fn_in_trait)]
pub trait WeatherProvider {
    /// Trailing one-day summary for the watering adjustment
    async fn get_watering_data(
        &self,
        coordinates: Coordinates,
    ) -> Result<WateringSummary, WeatherError>;

    /// Current conditions plus the multi-day forecast
    async fn get_weather_data(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherSummary, WeatherError>;

    /// Inputs for a reference-ET estimate over the trailing day
    async fn get_eto_data(&self, coordinates: Coordinates) -> Result<EToInputs, WeatherError>;
}

/// Open-Meteo-backed provider
pub struct OpenMeteoProvider {
    client: OpenMeteoClient,
    estimator: Box<dyn SolarRadiationEstimator + Send + Sync>,
    forecast_days: u8,
}

impl OpenMeteoProvider {
    /// Create a provider with the given solar-radiation estimator
    pub fn new(estimator: Box<dyn SolarRadiationEstimator + Send + Sync>) -> Self {
        Self {
            client: OpenMeteoClient::new(),
            estimator,
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }

    /// Override the forecast horizon
    pub fn with_forecast_days(mut self, days: u8) -> Self {
        self.forecast_days = days;
        self
    }
}

impl WeatherProvider for OpenMeteoProvider {
    async fn get_watering_data(
        &self,
        coordinates: Coordinates,
    ) -> Result<WateringSummary, WeatherError> {
        let (start, end) = trailing_day_window(Utc::now());
        let records = self.client.fetch_hourly(coordinates, start, end).await?;
        let samples = normalize_all(&records)?;

        watering_summary(OPEN_METEO_ORIGIN, &samples)
    }

    async fn get_weather_data(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherSummary, WeatherError> {
        let records = self
            .client
            .fetch_forecast(coordinates, self.forecast_days)
            .await?;
        let mut samples = normalize_all(&records)?;

        // A lone sample starting a new day is a partial-day remainder
        if samples.len() % 24 == 1 {
            samples.pop();
        }

        let Some(first) = samples.first() else {
            return Err(WeatherError::EmptyResponse);
        };
        let now = Utc::now().with_timezone(first.timestamp.offset());

        summarize_forecast(OPEN_METEO_ORIGIN, &samples, now)
    }

    async fn get_eto_data(&self, coordinates: Coordinates) -> Result<EToInputs, WeatherError> {
        let (start, end) = trailing_day_window(Utc::now());
        let records = self.client.fetch_hourly(coordinates, start, end).await?;
        let samples = normalize_all(&records)?;

        build_eto_inputs(
            OPEN_METEO_ORIGIN,
            &samples,
            coordinates,
            self.estimator.as_ref(),
        )
    }
}

/// Inclusive hour bounds of the trailing one-day window
///
/// The window ends at the most recent fully elapsed hour and spans 24
/// hourly points.
fn trailing_day_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let top_of_hour = now
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);

    let end = top_of_hour - Duration::hours(1);
    (end - Duration::hours(23), end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_trailing_day_window_spans_24_hours() {
        let now = Utc.with_ymd_and_hms(2024, 7, 15, 9, 42, 17).unwrap();
        let (start, end) = trailing_day_window(now);

        assert_eq!(end, Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap());
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 7, 14, 9, 0, 0).unwrap());
        // Inclusive hourly bounds: 24 sample points
        assert_eq!((end - start).num_hours() + 1, 24);
    }

    #[test]
    fn test_trailing_day_window_excludes_running_hour() {
        let now = Utc.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap();
        let (_, end) = trailing_day_window(now);

        // 09:00 has not elapsed yet
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap());
    }
}
