//! HTTP client for the hosted Moondream API.
//!
//! [`MoondreamClient`] implements [`VisionClient`] by POSTing JSON to the
//! `/query` and `/detect` endpoints with grounded reasoning enabled.

use crate::traits::{BoundingBox, VisionClient, VisionError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

/// Base URL of the hosted API.
pub const DEFAULT_BASE_URL: &str = "https://api.moondream.ai/v1";

const AUTH_HEADER: &str = "X-Moondream-Auth";

#[derive(Serialize)]
struct QueryRequest<'a> {
    image_url: &'a str,
    question: &'a str,
    reasoning: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    answer: String,
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    image_url: &'a str,
    object: &'a str,
    reasoning: bool,
}

#[derive(Deserialize)]
struct DetectResponse {
    #[serde(default)]
    objects: Vec<BoundingBox>,
}

#[derive(Clone)]
pub struct MoondreamClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl MoondreamClient {
    /// Create a client for the hosted API authenticated with `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Create a client targeting `base_url` (e.g. `http://localhost:8080/v1`).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, VisionError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "posting to moondream");
        let resp = self
            .http
            .post(&url)
            .header(AUTH_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(VisionError::Status(status.as_u16()));
        }
        Ok(resp.json::<R>().await?)
    }
}

#[async_trait]
impl VisionClient for MoondreamClient {
    async fn query(&self, image_url: &str, question: &str) -> Result<String, VisionError> {
        let req = QueryRequest {
            image_url,
            question,
            reasoning: true,
        };
        let res: QueryResponse = self.post("query", &req).await?;
        Ok(res.answer)
    }

    async fn detect(&self, image_url: &str, object: &str) -> Result<Vec<BoundingBox>, VisionError> {
        let req = DetectRequest {
            image_url,
            object,
            reasoning: true,
        };
        let res: DetectResponse = self.post("detect", &req).await?;
        Ok(res.objects)
    }
}
