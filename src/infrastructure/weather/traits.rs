use crate::domain::weather::{errors::WeatherError, snapshot::WeatherSnapshot};
use async_trait::async_trait;

/// Weather lookups against an external provider.
///
/// `forecast` includes current conditions plus the interval series; the
/// horizon must be within 1..=5 days and is validated before any network
/// call. Implementations perform no retries.
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn current_conditions(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<WeatherSnapshot, WeatherError>;

    async fn forecast(
        &self,
        city: &str,
        country: Option<&str>,
        days: u8,
    ) -> Result<WeatherSnapshot, WeatherError>;
}

/// Supported forecast horizon in days.
pub const FORECAST_DAYS_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Fail fast on an out-of-range forecast horizon.
pub fn validate_forecast_days(days: u8) -> Result<(), WeatherError> {
    if FORECAST_DAYS_RANGE.contains(&days) {
        Ok(())
    } else {
        Err(WeatherError::InvalidParameters(format!(
            "days must be between {} and {}",
            FORECAST_DAYS_RANGE.start(),
            FORECAST_DAYS_RANGE.end()
        )))
    }
}
