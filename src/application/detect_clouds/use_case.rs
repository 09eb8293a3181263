use crate::{
    application::detect_clouds::dto::DetectRequest,
    domain::detection::{errors::DetectionError, report::DetectionReport},
    infrastructure::{spool::image_spool::ImageSpool, vision::traits::CloudDetectionService},
};
use std::sync::Arc;
use tracing::instrument;

/// Standalone detection flow: spool the upload, run one detection call,
/// release the spool on both the success and the failure path.
pub struct DetectCloudsUseCase {
    spool: Arc<ImageSpool>,
    detector: Arc<dyn CloudDetectionService>,
}

impl DetectCloudsUseCase {
    pub fn new(spool: Arc<ImageSpool>, detector: Arc<dyn CloudDetectionService>) -> Self {
        Self { spool, detector }
    }

    /// # Errors
    ///
    /// The outer error is an infrastructure fault (the upload could not be
    /// spooled); the inner result is the classified detection outcome.
    #[instrument(skip(self, request), fields(image_size = request.image.len()))]
    pub async fn execute(
        &self,
        request: DetectRequest,
    ) -> anyhow::Result<Result<DetectionReport, DetectionError>> {
        let image = self
            .spool
            .acquire(&request.image, &request.content_type)
            .await?;

        let outcome = self.detector.detect(image.path()).await;
        image.release().await;
        Ok(outcome)
    }
}
