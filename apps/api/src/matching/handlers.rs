//! Axum route handlers for the matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_id: i64,
    pub job_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub resume_id: i64,
    pub job_id: i64,
    pub similarity_score: f64,
    /// "scored" | "empty_text" | "unknown_category"
    pub outcome: &'static str,
}

/// POST /api/v1/score
///
/// Scores a resume against a job without persisting anything.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let outcome = state
        .scorer
        .evaluate(request.resume_id, request.job_id)
        .await?;

    Ok(Json(ScoreResponse {
        resume_id: request.resume_id,
        job_id: request.job_id,
        similarity_score: outcome.value(),
        outcome: outcome.tag(),
    }))
}

/// GET /api/v1/job-titles
pub async fn handle_job_titles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.titles().to_vec())
}
