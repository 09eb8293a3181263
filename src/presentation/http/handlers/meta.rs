use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct ServiceInfo {
    message: &'static str,
    version: &'static str,
    status: &'static str,
}

pub async fn root() -> impl IntoResponse {
    Json(ServiceInfo {
        message: "Cloud Detection & Weather API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    success: bool,
    service: &'static str,
    missing_keys: Vec<&'static str>,
    healthy: bool,
}

/// Configuration health: reports which provider credentials are absent so a
/// frontend can detect misconfiguration before attempting live inference.
/// Always 200; a missing key is a reportable state, not a server fault.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let missing = state.config.missing_keys();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "Provider configuration incomplete");
    }

    Json(HealthResponse {
        success: true,
        service: "cloud-detection",
        healthy: missing.is_empty(),
        missing_keys: missing,
    })
}
