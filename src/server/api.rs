//! REST API handlers

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::{CategorizedError, Error};

// ============================================================================
// API Types
// ============================================================================

/// Body of `POST /analyze`
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub query: Option<String>,
}

impl AnalyzeRequest {
    /// Parse leniently: an unreadable body counts as no query
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Error envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Maps crate errors to HTTP responses
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(category = self.0.category().as_str(), error = %self.0, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/alljobs", get(all_jobs))
        .route("/health", get(health_check))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Search postings for the submitted query
async fn analyze(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let request = AnalyzeRequest::from_body(&body);
    let query = request.query.unwrap_or_default();

    let response = state.crawler.search_jobs(&query).await?;
    Ok(Json(response).into_response())
}

/// List current postings
async fn all_jobs(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.crawler.all_jobs().await)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
