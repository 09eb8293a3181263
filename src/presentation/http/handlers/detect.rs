use crate::{
    application::detect_clouds::{
        dto::{DetectRequest, DetectResponse},
        use_case::DetectCloudsUseCase,
    },
    presentation::http::{errors::ApiError, extract::image_from_multipart, state::AppState},
};
use axum::{Json, extract::Multipart, extract::State};

/// Standalone cloud detection on one uploaded frame.
///
/// Admission-controlled: live-capture clients can hammer this endpoint, so
/// when no permit is immediately free the request is rejected with 429
/// instead of queueing behind slower inference calls.
pub async fn detect_clouds(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DetectResponse>, ApiError> {
    let _permit = state
        .detect_permits
        .clone()
        .try_acquire_owned()
        .map_err(|_| ApiError::Busy)?;

    let upload = image_from_multipart(multipart).await?;
    let use_case = DetectCloudsUseCase::new(state.spool.clone(), state.detector.clone());

    let report = use_case
        .execute(DetectRequest {
            image: upload.bytes,
            content_type: upload.content_type,
            filename: upload.filename.clone(),
        })
        .await??;

    Ok(Json(DetectResponse {
        success: true,
        filename: upload.filename,
        predictions: report,
    }))
}
