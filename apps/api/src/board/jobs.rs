use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::board::pagination::{Page, PageParams};
use crate::catalog::JobCatalog;
use crate::errors::AppError;
use crate::models::job::JobRow;

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub recruiter_id: i64,
    /// Index into the job-title catalog.
    pub title_id: usize,
    pub description: Option<String>,
    pub location: String,
    pub employment_type: Option<String>,
}

/// Resolves the catalog title and checks required fields.
fn resolve_title<'a>(catalog: &'a JobCatalog, job: &NewJob) -> Result<&'a str, AppError> {
    if job.location.trim().is_empty() {
        return Err(AppError::Validation("location cannot be empty".to_string()));
    }
    catalog.title(job.title_id)
}

pub async fn create_job(
    pool: &PgPool,
    catalog: &JobCatalog,
    job: &NewJob,
) -> Result<JobRow, AppError> {
    let title = resolve_title(catalog, job)?;

    let row = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (recruiter_id, title, description, location, employment_type)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(job.recruiter_id)
    .bind(title)
    .bind(&job.description)
    .bind(&job.location)
    .bind(&job.employment_type)
    .fetch_one(pool)
    .await?;

    info!("Created job {} '{}' for recruiter {}", row.id, row.title, row.recruiter_id);
    Ok(row)
}

pub async fn get_job(pool: &PgPool, job_id: i64) -> Result<JobRow, AppError> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

pub async fn list_jobs(pool: &PgPool, params: PageParams) -> Result<Page<JobRow>, AppError> {
    let params = params.validate()?;
    let jobs = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY id OFFSET $1 LIMIT $2")
        .bind(params.skip)
        .bind(params.limit)
        .fetch_all(pool)
        .await?;
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?;
    Ok(Page::new(jobs, total, params))
}

pub async fn list_for_recruiter(pool: &PgPool, recruiter_id: i64) -> Result<Vec<JobRow>, AppError> {
    Ok(
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE recruiter_id = $1 ORDER BY id")
            .bind(recruiter_id)
            .fetch_all(pool)
            .await?,
    )
}

/// Applications cascade with the job (FK ON DELETE CASCADE).
pub async fn delete_job(pool: &PgPool, job_id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    info!("Deleted job {job_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> JobCatalog {
        JobCatalog::new(vec!["Java Developer".to_string(), "Testing".to_string()])
    }

    fn new_job(title_id: usize, location: &str) -> NewJob {
        NewJob {
            recruiter_id: 3,
            title_id,
            description: Some("Backend services".to_string()),
            location: location.to_string(),
            employment_type: None,
        }
    }

    #[test]
    fn test_resolves_catalog_title() {
        let catalog = catalog();
        assert_eq!(resolve_title(&catalog, &new_job(1, "Berlin")).unwrap(), "Testing");
    }

    #[test]
    fn test_invalid_title_id() {
        let catalog = catalog();
        let err = resolve_title(&catalog, &new_job(2, "Berlin")).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("title id")));
    }

    #[test]
    fn test_blank_location_rejected() {
        let catalog = catalog();
        assert!(matches!(
            resolve_title(&catalog, &new_job(0, "  ")),
            Err(AppError::Validation(_))
        ));
    }
}
