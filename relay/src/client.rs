use async_trait::async_trait;
use labeler::{LabelError, LabelRequest, LabelResult, LabelService};
use reqwest::Client;
use tracing::debug;

/// [`LabelService`] that submits images to a running relay's `/auto-label`.
#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    endpoint: String,
}

impl RelayClient {
    /// Create a client for the relay at `base_url` (e.g. `http://localhost:3002`).
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!("{}/auto-label", base_url.as_ref().trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LabelService for RelayClient {
    async fn label(&self, image: &str, prompt: &str) -> Result<LabelResult, LabelError> {
        debug!(endpoint = %self.endpoint, "submitting image");
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&LabelRequest::new(image, prompt))
            .send()
            .await
            .map_err(|e| LabelError::Request(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LabelError::Request(status.as_u16().to_string()));
        }
        resp.json::<LabelResult>()
            .await
            .map_err(|e| LabelError::Request(e.to_string()))
    }
}
