//! Labeling many images one after another.

use crate::error::LabelError;
use crate::ingest::ImageFile;
use crate::types::LabelResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Anything that can label one image.
#[async_trait]
pub trait LabelService: Send + Sync {
    async fn label(&self, image: &str, prompt: &str) -> Result<LabelResult, LabelError>;
}

/// Outcome for one image of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub name: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LabelResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn succeeded(name: impl Into<String>, data: LabelResult) -> Self {
        Self {
            name: name.into(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Label `images` strictly in order. A failing image is recorded and the
/// batch moves on.
pub async fn run_batch(
    service: &dyn LabelService,
    images: &[ImageFile],
    prompt: &str,
) -> Vec<BatchEntry> {
    let total = images.len();
    let mut entries = Vec::with_capacity(total);
    for (i, image) in images.iter().enumerate() {
        info!(name = %image.name, "processing {} of {}", i + 1, total);
        let entry = match service.label(&image.data, prompt).await {
            Ok(result) => BatchEntry::succeeded(&image.name, result),
            Err(err) => {
                error!(name = %image.name, %err, "labeling failed");
                BatchEntry::failed(&image.name, err.to_string())
            }
        };
        entries.push(entry);
    }
    entries
}
