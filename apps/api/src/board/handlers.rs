//! Axum route handlers for jobs, applications and the admin overview.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::board::applications::{
    apply_for_job, delete_application, list_for_candidate, list_for_job, update_status,
    ApplyRequest,
};
use crate::board::jobs::{create_job, delete_job, get_job, list_for_recruiter, list_jobs, NewJob};
use crate::board::overview::{overview, Overview};
use crate::board::pagination::{Page, PageParams};
use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<NewJob>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let job = create_job(&state.db, &state.catalog, &request).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<JobRow>>, AppError> {
    Ok(Json(list_jobs(&state.db, params).await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<JobRow>, AppError> {
    Ok(Json(get_job(&state.db, job_id).await?))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    delete_job(&state.db, job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/recruiters/:id/jobs
pub async fn handle_recruiter_jobs(
    State(state): State<AppState>,
    Path(recruiter_id): Path<i64>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(list_for_recruiter(&state.db, recruiter_id).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Applications
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications
///
/// Scores the candidate's current resume against the job and stores the result.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let application = apply_for_job(&state.db, &state.scorer, &request).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/jobs/:id/applications
pub async fn handle_job_applications(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<ApplicationRow>>, AppError> {
    Ok(Json(list_for_job(&state.db, job_id, params).await?))
}

/// GET /api/v1/candidates/:id/applications
pub async fn handle_candidate_applications(
    State(state): State<AppState>,
    Path(candidate_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<ApplicationRow>>, AppError> {
    Ok(Json(list_for_candidate(&state.db, candidate_id, params).await?))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(application_id): Path<i64>,
    Json(request): Json<StatusUpdate>,
) -> Result<Json<ApplicationRow>, AppError> {
    let status: ApplicationStatus = request.status.parse().map_err(AppError::Validation)?;
    Ok(Json(update_status(&state.db, application_id, status).await?))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    Path(application_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    delete_application(&state.db, application_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Admin
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/admin/overview
pub async fn handle_overview(State(state): State<AppState>) -> Result<Json<Overview>, AppError> {
    Ok(Json(overview(&state.db).await?))
}
