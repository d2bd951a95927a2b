//! HTTP request handlers for the extraction service.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::ExtractError;
use crate::router::ExtractionRouter;
use crate::tokens::count_tokens;
use crate::types::{ChunkingConfig, ChunkingRequest, ChunkingResponse, ExtractionMetadata, ServiceConfig};

/// Application state shared across handlers.
pub struct AppState {
    pub router: Arc<ExtractionRouter>,
    pub config: ServiceConfig,
}

impl AppState {
    /// Build the state, registering the default extractors.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            router: Arc::new(ExtractionRouter::with_defaults(&config)),
            config,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Description of a registered extractor.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractorInfo {
    pub name: String,
    pub description: String,
    pub extensions: Vec<String>,
}

/// List registered extractors.
pub async fn list_extractors(State(state): State<Arc<AppState>>) -> Json<Vec<ExtractorInfo>> {
    let extractors = state
        .router
        .list_extractors()
        .into_iter()
        .map(|(name, description, extensions)| ExtractorInfo {
            name: name.to_string(),
            description: description.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        })
        .collect();

    Json(extractors)
}

/// Query parameters accepted by the extract endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractParams {
    /// Declared file extension; inferred from filename or content type if absent
    pub extension: Option<String>,
    /// Original file name
    pub filename: Option<String>,
    /// Chunking strategy for the downstream chunker
    pub strategy: Option<String>,
    pub max_tokens: Option<usize>,
    pub overlap_tokens: Option<usize>,
}

/// Successful extraction, ready to hand to the chunker.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Identifier for this extraction
    pub id: Uuid,
    /// Extractor that produced the text
    pub extractor: String,
    /// Extension the document was dispatched on
    pub file_extension: String,
    /// Token count of the extracted text (cl100k_base)
    pub token_count: usize,
    pub extracted_at: DateTime<Utc>,
    /// Request for the downstream chunker
    pub request: ChunkingRequest,
}

/// Error returned to clients as a failed [`ChunkingResponse`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ChunkingResponse,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ChunkingResponse::error(message),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        let status = match &err {
            ExtractError::Configuration(_) => StatusCode::BAD_REQUEST,
            ExtractError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ExtractError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        warn!(error = %err, status = %status, "Extraction request failed");
        Self {
            status,
            body: ChunkingResponse::from(&err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Extract text from the uploaded document and wrap it in a chunking request.
pub async fn extract(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ExtractParams>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ExtractResponse>, ApiError> {
    let Query(params) = query.map_err(|e| {
        ExtractError::Configuration(format!("invalid query parameters: {}", e.body_text()))
    })?;

    let metadata = ExtractionMetadata {
        filename: params.filename,
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        extra: Default::default(),
    };

    let defaults = state.config.default_chunking_config();
    let config = ChunkingConfig {
        chunking_strategy: params.strategy.unwrap_or(defaults.chunking_strategy),
        max_tokens: params.max_tokens.or(defaults.max_tokens),
        overlap_tokens: params.overlap_tokens.or(defaults.overlap_tokens),
    };
    config.validate()?;

    let extension = params.extension.unwrap_or_default();
    info!(
        extension = %extension,
        filename = metadata.filename.as_deref().unwrap_or("-"),
        bytes = body.len(),
        strategy = %config.chunking_strategy,
        "Received extraction request"
    );

    // Parsing is CPU-bound; keep it off the async workers.
    let router = Arc::clone(&state.router);
    let extracted = tokio::task::spawn_blocking(move || router.extract(&body, &extension, &metadata))
        .await
        .map_err(|e| {
            error!(error = %e, "Extraction task failed");
            ApiError::internal(format!("extraction task failed: {}", e))
        })??;

    let token_count = count_tokens(&extracted.text);
    let request = ChunkingRequest::new(extracted.text, config)?;

    info!(
        extractor = extracted.extractor,
        chars = request.extracted_text.len(),
        tokens = token_count,
        "Extraction completed"
    );

    Ok(Json(ExtractResponse {
        id: Uuid::new_v4(),
        extractor: extracted.extractor.to_string(),
        file_extension: extracted.file_extension,
        token_count,
        extracted_at: Utc::now(),
        request,
    }))
}
