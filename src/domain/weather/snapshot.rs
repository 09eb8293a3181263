use serde::{Deserialize, Serialize};

/// Resolved location echoed back by the weather provider.
///
/// When no country code was supplied in the request, the provider's default
/// resolution applies; ambiguous city names may resolve to an unexpected
/// location. That pass-through behavior is deliberate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationInfo {
    pub name: String,
    pub country: Option<String>,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    /// Degrees Celsius (the provider is always queried with metric units)
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
    /// Title-cased conditions descriptor, e.g. "Scattered Clouds"
    pub description: String,
    pub main: String,
    pub icon: String,
    pub visibility_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wind {
    pub speed: f64,
    pub direction: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloudCover {
    /// Cloud coverage percentage
    pub coverage: i64,
}

/// Sunrise/sunset as unix timestamps. Reported by the current-conditions
/// endpoint only, so absent from pure forecast intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SunTimes {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemperatureRange {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub feels_like: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionsSummary {
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// One 3-hour forecast interval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: i64,
    pub temperature: TemperatureRange,
    pub humidity: i64,
    pub pressure: i64,
    pub conditions: ConditionsSummary,
    pub wind: Wind,
    pub clouds: CloudCover,
    /// Provider's `pop` scaled to percent
    pub precipitation_probability: f64,
}

/// Structured weather data for one resolved location.
///
/// `forecast` and `forecast_days` are present only for forecast requests;
/// forecast responses also include the current conditions block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub wind: Wind,
    pub clouds: CloudCover,
    pub sun: SunTimes,
    /// Provider observation time, unix seconds
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Vec<ForecastEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_days: Option<u8>,
}
