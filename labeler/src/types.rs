use moondream::BoundingBox;
use serde::{Deserialize, Serialize};

/// Message attached to a result when discovery found nothing.
pub const NO_OBJECTS_MESSAGE: &str = "No objects found";

/// Body of a labeling request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl LabelRequest {
    pub fn new(image: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            prompt: Some(prompt.into()),
        }
    }

    /// The image, unless it is missing or empty.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|img| !img.is_empty())
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or_default()
    }
}

/// One labeled box in normalized coordinates.
///
/// `original_index` counts boxes across every label of a request in the order
/// they were detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedBox {
    pub label: String,
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    #[serde(rename = "originalIndex")]
    pub original_index: usize,
}

impl DetectedBox {
    pub fn new(label: impl Into<String>, bbox: BoundingBox, original_index: usize) -> Self {
        Self {
            label: label.into(),
            x_min: bbox.x_min,
            y_min: bbox.y_min,
            x_max: bbox.x_max,
            y_max: bbox.y_max,
            original_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelResult {
    pub objects: Vec<DetectedBox>,
    pub original_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovered_objects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LabelResult {
    pub fn nothing_found(image: impl Into<String>) -> Self {
        Self {
            objects: Vec::new(),
            original_image: image.into(),
            discovered_objects: None,
            message: Some(NO_OBJECTS_MESSAGE.to_string()),
        }
    }

    pub fn found(image: impl Into<String>, labels: Vec<String>, boxes: Vec<DetectedBox>) -> Self {
        Self {
            objects: boxes,
            original_image: image.into(),
            discovered_objects: Some(labels),
            message: None,
        }
    }
}
