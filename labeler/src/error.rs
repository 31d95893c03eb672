use moondream::VisionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Moondream query failed: {0}")]
    Discovery(VisionError),
    #[error("Request failed: {0}")]
    Request(String),
}
