//! OpenWeatherMap client for current conditions and forecasts.

use crate::domain::weather::{
    errors::WeatherError,
    location_query,
    snapshot::{
        CloudCover, ConditionsSummary, Coordinates, CurrentConditions, ForecastEntry,
        LocationInfo, SunTimes, TemperatureRange, WeatherSnapshot, Wind,
    },
};
use crate::infrastructure::weather::traits::{WeatherService, validate_forecast_days};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Eight 3-hour intervals per forecast day; the provider caps `cnt` at 40.
const INTERVALS_PER_DAY: usize = 8;
const MAX_INTERVALS: usize = 40;

/// Client for the OpenWeatherMap 2.5 API, metric units.
///
/// Like the detection client, the credential is validated lazily on first use.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| WeatherError::Auth("OPENWEATHER_API_KEY is not configured".to_string()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        location: &str,
        extra: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key()?;
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut params = vec![
            ("q", location.to_string()),
            ("appid", api_key.to_string()),
            ("units", "metric".to_string()),
        ];
        params.extend(extra.iter().map(|(k, v)| (*k, v.clone())));

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e, "Weather request failed");
                if e.is_timeout() {
                    WeatherError::ProviderUnavailable("Provider request timed out".to_string())
                } else {
                    WeatherError::ProviderUnavailable(format!("Provider unreachable: {}", e))
                }
            })?;

        match response.status() {
            status if status.is_success() => response.json::<T>().await.map_err(|e| {
                WeatherError::ProviderUnavailable(format!("Unparseable provider response: {}", e))
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(WeatherError::Auth(
                "Provider rejected credential".to_string(),
            )),
            StatusCode::NOT_FOUND => Err(WeatherError::LocationNotFound(location.to_string())),
            status => Err(WeatherError::ProviderUnavailable(format!(
                "Provider returned {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_conditions(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let location = location_query(city, country);
        let raw: OwmCurrent = self.get_json("weather", &location, &[]).await?;
        debug!(%location, "Current conditions fetched");
        Ok(raw.into_snapshot())
    }

    #[instrument(skip(self))]
    async fn forecast(
        &self,
        city: &str,
        country: Option<&str>,
        days: u8,
    ) -> Result<WeatherSnapshot, WeatherError> {
        validate_forecast_days(days)?;
        let location = location_query(city, country);
        let intervals = (days as usize * INTERVALS_PER_DAY).min(MAX_INTERVALS);

        // Same provider on both legs, so one classification covers both and
        // short-circuiting on the first failure is fine.
        let forecast_params = [("cnt", intervals.to_string())];
        let (current, series) = tokio::try_join!(
            self.get_json::<OwmCurrent>("weather", &location, &[]),
            self.get_json::<OwmForecastResponse>("forecast", &location, &forecast_params),
        )?;

        let entries: Vec<ForecastEntry> = series
            .list
            .into_iter()
            .take(intervals)
            .map(OwmForecastItem::into_entry)
            .collect();
        debug!(%location, days, intervals = entries.len(), "Forecast fetched");

        let mut snapshot = current.into_snapshot();
        snapshot.forecast = Some(entries);
        snapshot.forecast_days = Some(days);
        Ok(snapshot)
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Default, Deserialize)]
struct OwmConditions {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwmMain {
    #[serde(default)]
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    temp_min: f64,
    #[serde(default)]
    temp_max: f64,
    #[serde(default)]
    humidity: i64,
    #[serde(default)]
    pressure: i64,
}

#[derive(Debug, Default, Deserialize)]
struct OwmWind {
    #[serde(default)]
    speed: f64,
    deg: Option<i64>,
    gust: Option<f64>,
}

impl OwmWind {
    fn into_wind(self) -> Wind {
        Wind {
            speed: self.speed,
            direction: self.deg,
            gust: self.gust,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct OwmClouds {
    #[serde(default)]
    all: i64,
}

#[derive(Debug, Default, Deserialize)]
struct OwmCoord {
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwmSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    #[serde(default)]
    name: String,
    #[serde(default)]
    sys: OwmSys,
    #[serde(default)]
    coord: OwmCoord,
    #[serde(default)]
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmConditions>,
    #[serde(default)]
    wind: OwmWind,
    #[serde(default)]
    clouds: OwmClouds,
    /// Meters; converted to kilometers in the snapshot
    #[serde(default)]
    visibility: f64,
    #[serde(default)]
    dt: i64,
}

impl OwmCurrent {
    fn into_snapshot(self) -> WeatherSnapshot {
        let conditions = self.weather.into_iter().next().unwrap_or_default();
        WeatherSnapshot {
            location: LocationInfo {
                name: self.name,
                country: self.sys.country,
                coordinates: Coordinates {
                    lat: self.coord.lat,
                    lon: self.coord.lon,
                },
            },
            current: CurrentConditions {
                temperature: self.main.temp,
                feels_like: self.main.feels_like,
                humidity: self.main.humidity,
                pressure: self.main.pressure,
                description: title_case(&conditions.description),
                main: conditions.main,
                icon: conditions.icon,
                visibility_km: self.visibility / 1000.0,
            },
            wind: self.wind.into_wind(),
            clouds: CloudCover {
                coverage: self.clouds.all,
            },
            sun: SunTimes {
                sunrise: self.sys.sunrise,
                sunset: self.sys.sunset,
            },
            timestamp: self.dt,
            forecast: None,
            forecast_days: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    #[serde(default)]
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    #[serde(default)]
    dt: i64,
    #[serde(default)]
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmConditions>,
    #[serde(default)]
    wind: OwmWind,
    #[serde(default)]
    clouds: OwmClouds,
    pop: Option<f64>,
}

impl OwmForecastItem {
    fn into_entry(self) -> ForecastEntry {
        let conditions = self.weather.into_iter().next().unwrap_or_default();
        ForecastEntry {
            timestamp: self.dt,
            temperature: TemperatureRange {
                current: self.main.temp,
                min: self.main.temp_min,
                max: self.main.temp_max,
                feels_like: self.main.feels_like,
            },
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            conditions: ConditionsSummary {
                main: conditions.main,
                description: title_case(&conditions.description),
                icon: conditions.icon,
            },
            wind: self.wind.into_wind(),
            clouds: CloudCover {
                coverage: self.clouds.all,
            },
            precipitation_probability: self.pop.unwrap_or(0.0) * 100.0,
        }
    }
}
