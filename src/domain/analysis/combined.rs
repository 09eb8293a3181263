use crate::domain::{
    detection::{errors::DetectionError, report::DetectionReport},
    weather::{errors::WeatherError, snapshot::WeatherSnapshot},
};

/// Outcome of the weather branch of a combined analysis.
///
/// `Omitted` means no location was supplied and no weather call was made.
/// It is not an error.
#[derive(Debug, Clone)]
pub enum WeatherBranch {
    Omitted,
    Attempted(Result<WeatherSnapshot, WeatherError>),
}

impl WeatherBranch {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Attempted(Ok(_)))
    }
}

/// The reconciled result of one combined analysis: both branches reported
/// independently, so one branch's failure never suppresses the other's
/// success.
#[derive(Debug, Clone)]
pub struct CombinedAnalysis {
    /// Advisory original filename of the upload
    pub filename: Option<String>,
    /// The location string as queried, e.g. "London,UK"; `None` when weather
    /// was omitted
    pub location: Option<String>,
    pub detection: Result<DetectionReport, DetectionError>,
    pub weather: WeatherBranch,
}

impl CombinedAnalysis {
    /// Overall success: at least one branch that was actually attempted
    /// succeeded. Detection is the primary capability, weather strictly
    /// additive, so a lone detection failure with weather omitted is a
    /// total failure.
    pub fn overall_success(&self) -> bool {
        self.detection.is_ok() || self.weather.succeeded()
    }
}
