pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::board::handlers;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/job-titles", get(matching::handle_job_titles))
        .route("/api/v1/score", post(matching::handle_score))
        // Jobs
        .route(
            "/api/v1/jobs",
            post(handlers::handle_create_job).get(handlers::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/:id",
            get(handlers::handle_get_job).delete(handlers::handle_delete_job),
        )
        .route(
            "/api/v1/jobs/:id/applications",
            get(handlers::handle_job_applications),
        )
        .route(
            "/api/v1/recruiters/:id/jobs",
            get(handlers::handle_recruiter_jobs),
        )
        // Applications
        .route("/api/v1/applications", post(handlers::handle_apply))
        .route(
            "/api/v1/applications/:id",
            axum::routing::delete(handlers::handle_delete_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(handlers::handle_update_status),
        )
        .route(
            "/api/v1/candidates/:id/applications",
            get(handlers::handle_candidate_applications),
        )
        // Admin
        .route("/api/v1/admin/overview", get(handlers::handle_overview))
        .with_state(state)
}
