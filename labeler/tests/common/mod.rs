use async_trait::async_trait;
use moondream::{BoundingBox, VisionClient, VisionError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Vision client replaying canned answers and recording every call.
pub struct ScriptedVision {
    answer: Result<String, u16>,
    detections: Mutex<VecDeque<Result<Vec<BoundingBox>, u16>>>,
    pub questions: Mutex<Vec<String>>,
    pub detected: Mutex<Vec<String>>,
}

impl ScriptedVision {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_string()),
            detections: Mutex::new(VecDeque::new()),
            questions: Mutex::new(Vec::new()),
            detected: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_query(status: u16) -> Self {
        Self {
            answer: Err(status),
            ..Self::answering("")
        }
    }

    pub fn then_detect(self, outcome: Result<Vec<BoundingBox>, u16>) -> Self {
        self.detections.lock().unwrap().push_back(outcome);
        self
    }

    pub fn detect_calls(&self) -> Vec<String> {
        self.detected.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionClient for ScriptedVision {
    async fn query(&self, _image_url: &str, question: &str) -> Result<String, VisionError> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answer.clone().map_err(VisionError::Status)
    }

    async fn detect(&self, _image_url: &str, object: &str) -> Result<Vec<BoundingBox>, VisionError> {
        self.detected.lock().unwrap().push(object.to_string());
        self.detections
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
            .map_err(VisionError::Status)
    }
}

pub fn bbox(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> BoundingBox {
    BoundingBox {
        x_min,
        y_min,
        x_max,
        y_max,
    }
}
