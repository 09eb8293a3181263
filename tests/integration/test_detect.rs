use super::helpers::*;
use axum::http::StatusCode;
use skywatch::domain::detection::errors::DetectionError;

#[tokio::test]
async fn detection_returns_the_report_and_echoes_the_filename() {
    let app = spawn_app(Ok(sample_report()), Ok(sample_snapshot()));

    let res = send(
        &app.app,
        multipart_post("/api/v1/detect", "image/jpeg", &tiny_jpeg_bytes()),
    )
    .await;

    let res = expect_status(res, StatusCode::OK).await;
    let body: serde_json::Value = read_json(res).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["filename"], "sky.jpg");
    assert_eq!(body["predictions"]["model_id"], "cloud-types2-vljyy/1");
    assert_eq!(body["predictions"]["summary"]["total_detections"], 1);
    assert_eq!(body["predictions"]["detections"][0]["label"], "cumulus");
    assert_eq!(app.spooled_files(), 0);
}

#[tokio::test]
async fn non_image_content_type_is_rejected_before_detection() {
    let app = spawn_app(Ok(sample_report()), Ok(sample_snapshot()));

    let res = send(
        &app.app,
        multipart_post("/api/v1/detect", "application/pdf", b"%PDF-1.4"),
    )
    .await;

    let res = expect_status(res, StatusCode::BAD_REQUEST).await;
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["kind"], "invalid_parameters");
    assert_eq!(app.detector.calls(), 0);
    assert_eq!(app.spooled_files(), 0);
}

#[tokio::test]
async fn exhausted_admission_permits_reject_with_429() {
    let app = spawn_app_with_permits(Ok(sample_report()), Ok(sample_snapshot()), 0);

    let res = send(
        &app.app,
        multipart_post("/api/v1/detect", "image/jpeg", &tiny_jpeg_bytes()),
    )
    .await;

    let res = expect_status(res, StatusCode::TOO_MANY_REQUESTS).await;
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["kind"], "busy");
    assert_eq!(app.detector.calls(), 0);
}

#[tokio::test]
async fn provider_outage_maps_to_503_and_still_releases_the_spool() {
    let app = spawn_app(
        Err(DetectionError::ProviderUnavailable("timeout".into())),
        Ok(sample_snapshot()),
    );

    let res = send(
        &app.app,
        multipart_post("/api/v1/detect", "image/jpeg", &tiny_jpeg_bytes()),
    )
    .await;

    let res = expect_status(res, StatusCode::SERVICE_UNAVAILABLE).await;
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["kind"], "provider_unavailable");
    assert_eq!(app.spooled_files(), 0);
}

#[tokio::test]
async fn rejected_credential_maps_to_502() {
    let app = spawn_app(
        Err(DetectionError::Auth("bad key".into())),
        Ok(sample_snapshot()),
    );

    let res = send(
        &app.app,
        multipart_post("/api/v1/detect", "image/jpeg", &tiny_jpeg_bytes()),
    )
    .await;

    let res = expect_status(res, StatusCode::BAD_GATEWAY).await;
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["kind"], "auth_error");
}

#[tokio::test]
async fn provider_rejecting_the_image_maps_to_400() {
    let app = spawn_app(
        Err(DetectionError::InvalidImage("unreadable".into())),
        Ok(sample_snapshot()),
    );

    let res = send(
        &app.app,
        multipart_post("/api/v1/detect", "image/png", b"not-really-png"),
    )
    .await;

    let res = expect_status(res, StatusCode::BAD_REQUEST).await;
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["kind"], "invalid_image");
    assert_eq!(app.spooled_files(), 0);
}
