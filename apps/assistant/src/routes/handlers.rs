//! Axum route handlers exposing the classifier and the LinkedIn collaborator over HTTP.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::classifier::ClassificationResult;
use crate::errors::AppError;
use crate::linkedin::models::{JobListing, ProfileData};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobSearchRequest {
    pub query: Option<String>,
    pub location: Option<String>,
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobListing>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/classify
///
/// Classifies a message. Always 200 once the body is valid; classifier
/// failures show up as UNKNOWN with a sentinel confidence.
pub async fn handle_classify(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    let Json(request) = payload?;
    let message = request
        .message
        .ok_or_else(|| AppError::Validation("Missing 'message' field".to_string()))?;

    Ok(Json(state.classifier.classify(&message).await))
}

/// GET /api/profile
///
/// Returns the profile as fetched. Upstream failures are reported in the
/// `error` field, not as an HTTP error.
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<ProfileData> {
    Json(state.linkedin.get_profile().await)
}

/// POST /api/jobs/search
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    payload: Result<Json<JobSearchRequest>, JsonRejection>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let Json(request) = payload?;
    let query = request
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing 'query' field".to_string()))?;

    let jobs = state
        .linkedin
        .search_jobs(
            query.trim(),
            request.location.as_deref(),
            request.keywords.as_deref(),
        )
        .await;

    Ok(Json(JobSearchResponse { jobs }))
}
