use super::{
    handlers::{analyze, detect, docs, meta, weather},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Service identity + configuration health
        .route("/", get(meta::root))
        .route("/health", get(meta::health_check))
        // Cloud detection
        .route("/api/v1/detect", post(detect::detect_clouds))
        // Weather
        .route("/api/v1/weather", get(weather::current_weather))
        .route("/api/v1/weather/forecast", get(weather::weather_forecast))
        // Combined analysis
        .route("/api/v1/analyze", post(analyze::analyze_sky))
        // Docs
        .route("/api/v1/docs", get(docs::api_docs))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
