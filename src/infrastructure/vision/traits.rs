use crate::domain::detection::{errors::DetectionError, report::DetectionReport};
use async_trait::async_trait;
use std::path::Path;

/// Cloud-type detection against an external inference provider.
///
/// Implementations send the image at `image_path` to the provider and parse
/// the response; they do not retry, and they never touch the spool lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CloudDetectionService: Send + Sync {
    async fn detect(&self, image_path: &Path) -> Result<DetectionReport, DetectionError>;
}
