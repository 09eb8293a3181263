//! Multipart extraction for image-upload endpoints.

use crate::presentation::http::errors::ApiError;
use axum::extract::Multipart;
use bytes::Bytes;

/// One uploaded image pulled out of a multipart body.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Bytes,
    pub content_type: String,
    pub filename: Option<String>,
}

/// Read the `file` field from a multipart body.
///
/// Rejects a missing field, an empty payload, and a declared content type
/// outside `image/*` before anything is written to disk or sent upstream.
pub async fn image_from_multipart(mut multipart: Multipart) -> Result<ImageUpload, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::InvalidParameters("Malformed multipart body".into()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|_| ApiError::InvalidParameters("Failed to read uploaded file".into()))?;

        upload = Some(ImageUpload {
            bytes,
            content_type,
            filename,
        });
    }

    let upload = upload
        .ok_or_else(|| ApiError::InvalidParameters("Missing multipart field 'file'".into()))?;

    if !upload.content_type.starts_with("image/") {
        return Err(ApiError::InvalidParameters(
            "File must be an image".into(),
        ));
    }
    if upload.bytes.is_empty() {
        return Err(ApiError::InvalidParameters("Uploaded file is empty".into()));
    }

    Ok(upload)
}
