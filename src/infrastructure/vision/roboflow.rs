//! Roboflow hosted-inference client for cloud-type detection.

use crate::domain::detection::{
    errors::DetectionError,
    report::{BoundingBox, Detection, DetectionReport, ImageDimensions},
};
use crate::infrastructure::vision::traits::CloudDetectionService;
use async_trait::async_trait;
use base64::Engine;
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the Roboflow hosted object-detection API.
///
/// The credential is validated lazily: a missing key fails with an auth error
/// on the first call, not at startup, so the service can boot unconfigured.
pub struct RoboflowDetector {
    client: reqwest::Client,
    base_url: String,
    model_id: String,
    api_key: Option<String>,
}

impl RoboflowDetector {
    pub fn new(
        base_url: impl Into<String>,
        model_id: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            model_id: model_id.into(),
            api_key,
        })
    }

    fn classify_status(status: StatusCode, body: &str) -> DetectionError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                DetectionError::Auth(format!("Provider rejected credential ({})", status))
            }
            StatusCode::BAD_REQUEST
            | StatusCode::UNSUPPORTED_MEDIA_TYPE
            | StatusCode::UNPROCESSABLE_ENTITY => {
                DetectionError::InvalidImage(truncate(body, 200).to_string())
            }
            s if s == StatusCode::TOO_MANY_REQUESTS || s.is_server_error() => {
                DetectionError::ProviderUnavailable(format!("Provider returned {}", s))
            }
            s => DetectionError::ProviderUnavailable(format!("Unexpected provider status {}", s)),
        }
    }
}

#[async_trait]
impl CloudDetectionService for RoboflowDetector {
    #[instrument(skip(self), fields(model_id = %self.model_id))]
    async fn detect(&self, image_path: &Path) -> Result<DetectionReport, DetectionError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DetectionError::Auth("ROBOFLOW_API_KEY is not configured".to_string())
        })?;

        let bytes = tokio::fs::read(image_path).await.map_err(|e| {
            DetectionError::ProviderUnavailable(format!("Failed to read spooled image: {}", e))
        })?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

        // The hosted API takes the base64 payload as a form-encoded body on
        // POST {base}/{model_id}?api_key=...
        let url = format!("{}/{}", self.base_url, self.model_id);
        let response = self
            .client
            .post(&url)
            .query(&[("api_key", api_key)])
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(encoded)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Detection request failed");
                if e.is_timeout() {
                    DetectionError::ProviderUnavailable("Provider request timed out".to_string())
                } else {
                    DetectionError::ProviderUnavailable(format!("Provider unreachable: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, &body));
        }

        let raw: RoboflowResponse = response.json().await.map_err(|e| {
            DetectionError::ProviderUnavailable(format!("Unparseable provider response: {}", e))
        })?;

        let detections = raw
            .predictions
            .into_iter()
            .map(|p| Detection {
                label: p.class,
                confidence: p.confidence,
                bounding_box: BoundingBox {
                    x: p.x,
                    y: p.y,
                    width: p.width,
                    height: p.height,
                },
            })
            .collect::<Vec<_>>();

        debug!(detections = detections.len(), "Detection call succeeded");
        Ok(DetectionReport::new(
            raw.model_id.unwrap_or_else(|| self.model_id.clone()),
            ImageDimensions {
                width: raw.image.width,
                height: raw.image.height,
            },
            detections,
        ))
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[derive(Debug, Deserialize)]
struct RoboflowResponse {
    #[serde(default)]
    predictions: Vec<RoboflowPrediction>,
    #[serde(default)]
    image: RoboflowImage,
    #[serde(default)]
    model_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RoboflowPrediction {
    class: String,
    confidence: f64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Default, Deserialize)]
struct RoboflowImage {
    width: Option<u32>,
    height: Option<u32>,
}
