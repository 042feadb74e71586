//! Record store seam: the scorer resolves resumes and jobs by id through this trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn resolve_resume(&self, resume_id: i64) -> Result<Option<ResumeRow>, AppError>;

    async fn resolve_job(&self, job_id: i64) -> Result<Option<JobRow>, AppError>;
}

/// Postgres-backed record store over the `resumes` and `jobs` tables.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn resolve_resume(&self, resume_id: i64) -> Result<Option<ResumeRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
                .bind(resume_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn resolve_job(&self, job_id: i64) -> Result<Option<JobRow>, AppError> {
        Ok(
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
                .bind(job_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}
