#![allow(dead_code)]

use async_trait::async_trait;
use moondream::{BoundingBox, VisionClient, VisionError};
use relay::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Vision client answering every query with `answer` and every detection
/// with one box, unless the object is listed in `failing`.
pub struct FakeVision {
    pub answer: Result<String, u16>,
    pub failing: Vec<String>,
    pub calls: AtomicUsize,
}

impl FakeVision {
    pub fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(answer.to_string()),
            failing: Vec::new(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionClient for FakeVision {
    async fn query(&self, _image_url: &str, _question: &str) -> Result<String, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().map_err(VisionError::Status)
    }

    async fn detect(&self, _image_url: &str, object: &str) -> Result<Vec<BoundingBox>, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|f| f == object) {
            return Err(VisionError::Status(500));
        }
        Ok(vec![BoundingBox {
            x_min: 0.1,
            y_min: 0.2,
            x_max: 0.5,
            y_max: 0.6,
        }])
    }
}

pub fn state_with(vision: Option<Arc<FakeVision>>) -> AppState {
    AppState::new(
        vision.map(|v| v as Arc<dyn VisionClient>),
        relay::config::DEFAULT_STATIC_DIR,
    )
}
