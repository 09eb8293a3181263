use crate::domain::detection::report::DetectionReport;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One standalone detection request.
#[derive(Debug, Clone)]
pub struct DetectRequest {
    pub image: Bytes,
    pub content_type: String,
    /// Advisory only; echoed back in the response
    pub filename: Option<String>,
}

/// The standalone detection endpoint's response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectResponse {
    pub success: bool,
    pub filename: Option<String>,
    pub predictions: DetectionReport,
}
