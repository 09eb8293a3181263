use crate::domain::{
    analysis::combined::{CombinedAnalysis, WeatherBranch},
    detection::report::DetectionReport,
    weather::snapshot::WeatherSnapshot,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One combined-analysis request: an image plus optional location parameters.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub image: Bytes,
    pub content_type: String,
    /// Advisory only; echoed back in the report
    pub filename: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Serialized outcome of the detection branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectionOutcome {
    Ok { report: DetectionReport },
    Error { kind: String, message: String },
}

/// Serialized outcome of the weather branch. `Omitted` means no location was
/// supplied; it is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherOutcome {
    Ok { snapshot: WeatherSnapshot },
    Error { kind: String, message: String },
    Omitted,
}

/// The combined endpoint's response body: each attempted branch reported
/// independently, plus the overall success verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedReport {
    pub success: bool,
    pub filename: Option<String>,
    /// The location string as queried, null when weather was omitted
    pub location: Option<String>,
    pub cloud_detection: DetectionOutcome,
    pub weather: WeatherOutcome,
}

impl From<CombinedAnalysis> for CombinedReport {
    fn from(analysis: CombinedAnalysis) -> Self {
        let success = analysis.overall_success();
        let cloud_detection = match analysis.detection {
            Ok(report) => DetectionOutcome::Ok { report },
            Err(e) => DetectionOutcome::Error {
                kind: e.kind().to_string(),
                message: e.to_string(),
            },
        };
        let weather = match analysis.weather {
            WeatherBranch::Omitted => WeatherOutcome::Omitted,
            WeatherBranch::Attempted(Ok(snapshot)) => WeatherOutcome::Ok { snapshot },
            WeatherBranch::Attempted(Err(e)) => WeatherOutcome::Error {
                kind: e.kind().to_string(),
                message: e.to_string(),
            },
        };
        Self {
            success,
            filename: analysis.filename,
            location: analysis.location,
            cloud_detection,
            weather,
        }
    }
}
