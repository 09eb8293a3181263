use crate::{
    config::Config,
    infrastructure::{
        spool::image_spool::ImageSpool, vision::traits::CloudDetectionService,
        weather::traits::WeatherService,
    },
};
use std::sync::Arc;
use tokio::sync::Semaphore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub spool: Arc<ImageSpool>,
    pub detector: Arc<dyn CloudDetectionService>,
    pub weather: Arc<dyn WeatherService>,
    /// Admission control for the standalone detection endpoint: when no
    /// permit is free the request is rejected with 429 instead of queueing.
    pub detect_permits: Arc<Semaphore>,
}
