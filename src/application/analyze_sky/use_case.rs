use crate::{
    application::analyze_sky::dto::AnalyzeRequest,
    domain::{
        analysis::combined::{CombinedAnalysis, WeatherBranch},
        weather::location_query,
    },
    infrastructure::{
        spool::image_spool::ImageSpool, vision::traits::CloudDetectionService,
        weather::traits::WeatherService,
    },
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Orchestrates one combined analysis: spool the upload, fan out to the two
/// providers, reconcile the branch outcomes, and reclaim the spooled file.
///
/// The two provider calls are independent. They run concurrently so total
/// latency is bounded by the slower of the two, and one branch's failure
/// never cancels the other's in-flight call. The spool handle is released
/// once both branches have settled; if the request future is dropped before
/// that, the handle's drop fallback still reclaims the file.
///
/// Every call performs fresh provider calls; nothing is cached across
/// requests.
pub struct AnalyzeSkyUseCase {
    spool: Arc<ImageSpool>,
    detector: Arc<dyn CloudDetectionService>,
    weather: Arc<dyn WeatherService>,
}

impl AnalyzeSkyUseCase {
    pub fn new(
        spool: Arc<ImageSpool>,
        detector: Arc<dyn CloudDetectionService>,
        weather: Arc<dyn WeatherService>,
    ) -> Self {
        Self {
            spool,
            detector,
            weather,
        }
    }

    /// Run the combined analysis end-to-end.
    ///
    /// # Errors
    ///
    /// Returns an error only when the upload cannot be spooled; provider
    /// failures are captured per branch inside the returned analysis rather
    /// than raised past this boundary.
    #[instrument(skip(self, request), fields(
        image_size = request.image.len(),
        has_location = request.city.is_some()
    ))]
    pub async fn execute(&self, request: AnalyzeRequest) -> anyhow::Result<CombinedAnalysis> {
        let image = self
            .spool
            .acquire(&request.image, &request.content_type)
            .await?;

        let location = request
            .city
            .as_deref()
            .map(|city| location_query(city, request.country.as_deref()));

        let detection_branch = self.detector.detect(image.path());
        let weather_branch = async {
            match request.city.as_deref() {
                Some(city) => WeatherBranch::Attempted(
                    self.weather
                        .current_conditions(city, request.country.as_deref())
                        .await,
                ),
                None => WeatherBranch::Omitted,
            }
        };

        // join! drives both branches to completion regardless of individual
        // failures; there is no cross-cancellation between the providers.
        let (detection, weather) = tokio::join!(detection_branch, weather_branch);

        image.release().await;
        debug!(
            detection_ok = detection.is_ok(),
            weather_ok = weather.succeeded(),
            "Branches settled, spool released"
        );

        Ok(CombinedAnalysis {
            filename: request.filename,
            location,
            detection,
            weather,
        })
    }
}
