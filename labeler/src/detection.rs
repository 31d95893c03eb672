//! Detection phase: localize each discovered label in turn.

use crate::types::DetectedBox;
use futures::{StreamExt, stream};
use moondream::{BoundingBox, VisionClient, VisionError};
use tracing::{debug, warn};

/// Boxes collected so far and the index the next box will receive.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Accumulator {
    next_index: usize,
    boxes: Vec<DetectedBox>,
}

impl Accumulator {
    /// Fold one label's detection outcome into the accumulator.
    ///
    /// Boxes are numbered with a single counter shared by all labels. A
    /// failed detection is logged and contributes nothing.
    pub fn absorb(mut self, label: &str, outcome: Result<Vec<BoundingBox>, VisionError>) -> Self {
        match outcome {
            Ok(found) => {
                debug!(%label, count = found.len(), "detected");
                for bbox in found {
                    self.boxes.push(DetectedBox::new(label, bbox, self.next_index));
                    self.next_index += 1;
                }
            }
            Err(err) => warn!(%label, %err, "detection failed"),
        }
        self
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn boxes(&self) -> &[DetectedBox] {
        &self.boxes
    }

    pub fn into_boxes(self) -> Vec<DetectedBox> {
        self.boxes
    }
}

/// Issue one detection call per label, one at a time and in order.
pub async fn detect(client: &dyn VisionClient, image: &str, labels: &[String]) -> Vec<DetectedBox> {
    stream::iter(labels)
        .fold(Accumulator::default(), move |acc, label| async move {
            let outcome = client.detect(image, label).await;
            acc.absorb(label, outcome)
        })
        .await
        .into_boxes()
}
