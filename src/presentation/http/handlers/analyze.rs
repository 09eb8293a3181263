use crate::{
    application::analyze_sky::{
        dto::{AnalyzeRequest, CombinedReport, DetectionOutcome},
        use_case::AnalyzeSkyUseCase,
    },
    presentation::http::{errors::ApiError, extract::image_from_multipart, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AnalyzeQuery {
    pub city: Option<String>,
    pub country: Option<String>,
}

/// The combined endpoint: cloud detection plus, when a city is supplied,
/// current weather for that location.
///
/// The response always carries the full per-branch body. Overall success
/// needs at least one attempted branch to have succeeded; on total failure
/// the request-level status comes from the detection branch, the primary
/// capability of this endpoint.
pub async fn analyze_sky(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = image_from_multipart(multipart).await?;
    let use_case = AnalyzeSkyUseCase::new(
        state.spool.clone(),
        state.detector.clone(),
        state.weather.clone(),
    );

    let analysis = use_case
        .execute(AnalyzeRequest {
            image: upload.bytes,
            content_type: upload.content_type,
            filename: upload.filename,
            city: query.city,
            country: query.country,
        })
        .await?;

    let report = CombinedReport::from(analysis);
    let status = if report.success {
        StatusCode::OK
    } else {
        status_for_total_failure(&report.cloud_detection)
    };

    Ok((status, Json(report)).into_response())
}

fn status_for_total_failure(detection: &DetectionOutcome) -> StatusCode {
    match detection {
        DetectionOutcome::Error { kind, .. } => match kind.as_str() {
            "invalid_image" => StatusCode::BAD_REQUEST,
            "auth_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::SERVICE_UNAVAILABLE,
        },
        // Total failure implies the detection branch failed
        DetectionOutcome::Ok { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
