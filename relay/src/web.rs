use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use labeler::{LabelError, LabelRequest, LabelResult};
use moondream::VisionClient;
use serde_json::json;
use std::{path::PathBuf, sync::Arc};
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
};
use tracing::{error, info, warn};

/// Largest accepted request body; images arrive base64-encoded.
pub const BODY_LIMIT: usize = 50 * 1024 * 1024;

const NO_STORE: &str = "no-store, no-cache, must-revalidate, private";

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured.
    pub vision: Option<Arc<dyn VisionClient>>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(vision: Option<Arc<dyn VisionClient>>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            vision,
            static_dir: static_dir.into(),
        }
    }
}

/// Errors returned by `/auto-label` as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Image is required")]
    MissingImage,
    #[error("{0}")]
    BadRequest(String),
    #[error("MOONDREAM_API_KEY not configured")]
    MissingApiKey,
    #[error("Auto-labeling failed: {0}")]
    Labeling(#[from] LabelError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingApiKey | ApiError::Labeling(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // A body that is not JSON-typed carries no image.
            JsonRejection::MissingJsonContentType(_) => ApiError::MissingImage,
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

/// Serve the embedded `index.html`.
pub async fn index() -> Html<&'static str> {
    static INDEX: &str = include_str!("../static/index.html");
    Html(INDEX)
}

/// Discover and localize the objects in the posted image.
pub async fn auto_label(
    State(state): State<AppState>,
    payload: Result<Json<LabelRequest>, JsonRejection>,
) -> Result<Json<LabelResult>, ApiError> {
    let Json(req) = payload?;
    let image = req.image().ok_or(ApiError::MissingImage)?;
    let vision = state.vision.as_deref().ok_or_else(|| {
        warn!("auto-label requested without an API key");
        ApiError::MissingApiKey
    })?;

    info!(prompt = %req.prompt(), "auto-labeling image");
    let result = labeler::label(vision, image, req.prompt())
        .await
        .map_err(|err| {
            error!(%err, "auto-labeling failed");
            ApiError::from(err)
        })?;
    Ok(Json(result))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

/// Build the application router with the provided state.
pub fn app(state: AppState) -> Router {
    let assets = ServeDir::new(&state.static_dir);
    Router::new()
        .route("/", get(index))
        .route("/auto-label", post(auto_label))
        .fallback_service(assets)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(NO_STORE),
        ))
        .layer(cors())
        .with_state(state)
}
