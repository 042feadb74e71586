use std::sync::Arc;

use sqlx::PgPool;

use crate::catalog::JobCatalog;
use crate::config::Config;
use crate::matching::scorer::SimilarityScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Recruiter-facing job titles; may drift from the classifier's labels.
    pub catalog: Arc<JobCatalog>,
    /// Built once at startup around the loaded classifier; never reloaded.
    pub scorer: SimilarityScorer,
}
