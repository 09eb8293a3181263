use crate::{
    domain::weather::location_query,
    presentation::http::{errors::ApiError, state::AppState},
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct WeatherQuery {
    pub city: String,
    pub country: Option<String>,
}

#[derive(Deserialize)]
pub struct ForecastQuery {
    pub city: String,
    pub country: Option<String>,
    /// Forecast horizon; the provider supports 1 to 5 days
    pub days: Option<u8>,
}

pub async fn current_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let snapshot = state
        .weather
        .current_conditions(&query.city, query.country.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "location": location_query(&query.city, query.country.as_deref()),
        "weather": snapshot,
    })))
}

pub async fn weather_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let days = query.days.unwrap_or(5);
    let snapshot = state
        .weather
        .forecast(&query.city, query.country.as_deref(), days)
        .await?;

    Ok(Json(json!({
        "success": true,
        "location": location_query(&query.city, query.country.as_deref()),
        "forecast": snapshot,
    })))
}
