use axum::Json;

pub async fn api_docs() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Cloud Detection & Weather API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/": { "get": { "summary": "Service identity" } },
            "/health": { "get": { "summary": "Configuration health (lists missing provider keys)" } },
            "/api/v1/detect": { "post": { "summary": "Detect cloud types in an uploaded image (multipart field 'file'; 429 under load)" } },
            "/api/v1/weather": { "get": { "summary": "Current weather for a city (optional country code hint)" } },
            "/api/v1/weather/forecast": { "get": { "summary": "Weather forecast for a city (days 1-5, default 5)" } },
            "/api/v1/analyze": { "post": { "summary": "Combined cloud detection + weather; city/country query params optional" } },
            "/api/v1/docs": { "get": { "summary": "OpenAPI spec" } }
        }
    }))
}
