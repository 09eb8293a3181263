use serde::{Deserialize, Serialize};

/// One detected cloud formation in an analyzed image.
///
/// Confidence is provider-reported and passed through unmodified; the bounding
/// box uses the provider's center-point convention in image pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    pub bounding_box: BoundingBox,
}

/// Center-point bounding box in image pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Pixel dimensions of the analyzed image as reported by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageDimensions {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionSummary {
    pub total_detections: usize,
}

/// Full result of one cloud-detection call.
///
/// An empty `detections` list is a valid outcome: a clear sky is not an error.
/// Entries are ordered by confidence descending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionReport {
    pub model_id: String,
    pub image_dimensions: ImageDimensions,
    pub detections: Vec<Detection>,
    pub summary: DetectionSummary,
}

impl DetectionReport {
    /// Build a report from provider-order detections, sorting by confidence
    /// descending (provider order is not guaranteed).
    pub fn new(
        model_id: String,
        image_dimensions: ImageDimensions,
        mut detections: Vec<Detection>,
    ) -> Self {
        detections.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let summary = DetectionSummary {
            total_detections: detections.len(),
        };
        Self {
            model_id,
            image_dimensions,
            detections,
            summary,
        }
    }
}
