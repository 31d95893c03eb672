use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single normalized box returned by the detection endpoint.
///
/// Coordinates are fractions of the image width and height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for VisionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            VisionError::InvalidResponse(err.to_string())
        } else {
            VisionError::Network(err.to_string())
        }
    }
}

/// Something that can answer questions about an image and localize objects in it.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Ask a free-text `question` about the image and return the answer text.
    async fn query(&self, image_url: &str, question: &str) -> Result<String, VisionError>;

    /// Localize every instance of `object` in the image.
    async fn detect(&self, image_url: &str, object: &str) -> Result<Vec<BoundingBox>, VisionError>;
}
