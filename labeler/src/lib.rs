//! Two-phase auto-labeling on top of a vision-language model.
//!
//! [`label`] first asks the model which objects are visible (the discovery
//! phase), then localizes each discovered label with its own detection call
//! and merges every box into a single [`LabelResult`].
//!
//! ```no_run
//! use labeler::label;
//! use moondream::MoondreamClient;
//!
//! # async fn run() -> Result<(), labeler::LabelError> {
//! let client = MoondreamClient::new("api-key");
//! let result = label(&client, "data:image/png;base64,...", "cars and signs").await?;
//! println!("{} boxes", result.objects.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use moondream::VisionClient;
use std::sync::Arc;
use tracing::info;

pub mod batch;
pub mod detection;
pub mod discovery;
pub mod error;
pub mod ingest;
pub mod present;
pub mod prompt;
pub mod types;

pub use batch::{BatchEntry, LabelService, run_batch};
pub use detection::{Accumulator, detect};
pub use discovery::{answer_reports_nothing, discover, parse_labels};
pub use error::LabelError;
pub use ingest::{ImageFile, IngestError, collect_images};
pub use present::{Filter, FilterState, LabelPalette, PixelRect, render_overlay_svg, visible_boxes};
pub use prompt::{PromptKind, discovery_question};
pub use types::{DetectedBox, LabelRequest, LabelResult, NO_OBJECTS_MESSAGE};

/// Discover the objects in `image` matching `prompt` and localize each of them.
///
/// Fails only when the discovery call fails. A detection failure for one
/// label is logged and that label contributes no boxes.
pub async fn label(
    client: &dyn VisionClient,
    image: &str,
    prompt: &str,
) -> Result<LabelResult, LabelError> {
    let labels = discover(client, image, prompt).await?;
    if labels.is_empty() {
        info!("no objects discovered");
        return Ok(LabelResult::nothing_found(image));
    }

    info!(count = labels.len(), "detecting objects");
    let boxes = detect(client, image, &labels).await;
    info!(boxes = boxes.len(), "found bounding boxes");
    Ok(LabelResult::found(image, labels, boxes))
}

/// [`LabelService`] that calls the vision model in-process.
#[derive(Clone)]
pub struct Labeler {
    client: Arc<dyn VisionClient>,
}

impl Labeler {
    pub fn new(client: Arc<dyn VisionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LabelService for Labeler {
    async fn label(&self, image: &str, prompt: &str) -> Result<LabelResult, LabelError> {
        label(self.client.as_ref(), image, prompt).await
    }
}
