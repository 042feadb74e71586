use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::board::jobs::get_job;
use crate::board::pagination::{Page, PageParams};
use crate::errors::AppError;
use crate::matching::scorer::SimilarityScorer;
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::models::resume::ResumeRow;

#[derive(Debug, Clone, Deserialize)]
pub struct ApplyRequest {
    pub candidate_id: i64,
    pub job_id: i64,
    pub cover_letter: Option<String>,
}

/// Submits an application using the candidate's current resume. The similarity
/// score is computed here once and stored; it is never recomputed on read.
pub async fn apply_for_job(
    pool: &PgPool,
    scorer: &SimilarityScorer,
    request: &ApplyRequest,
) -> Result<ApplicationRow, AppError> {
    let resume = current_resume(pool, request.candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume found for this user".to_string()))?;
    let job = get_job(pool, request.job_id).await?;

    let similarity_score = scorer.score(resume.id, job.id).await?;

    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (job_id, candidate_id, resume_id, cover_letter, similarity_score, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(job.id)
    .bind(request.candidate_id)
    .bind(resume.id)
    .bind(normalize_cover_letter(request.cover_letter.as_deref()))
    .bind(similarity_score)
    .bind(ApplicationStatus::Applied.as_str())
    .fetch_one(pool)
    .await?;

    info!(
        "Application {} by candidate {} to job {} scored {:.4}",
        row.id, row.candidate_id, row.job_id, row.similarity_score
    );
    Ok(row)
}

/// The candidate's most recent resume, if any.
pub async fn current_resume(pool: &PgPool, candidate_id: i64) -> Result<Option<ResumeRow>, AppError> {
    Ok(sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY uploaded_at DESC, id DESC LIMIT 1",
    )
    .bind(candidate_id)
    .fetch_optional(pool)
    .await?)
}

/// Applications to a job, best match first.
pub async fn list_for_job(
    pool: &PgPool,
    job_id: i64,
    params: PageParams,
) -> Result<Page<ApplicationRow>, AppError> {
    let params = params.validate()?;
    get_job(pool, job_id).await?;

    let rows = sqlx::query_as::<_, ApplicationRow>(
        r#"
        SELECT * FROM applications
        WHERE job_id = $1
        ORDER BY similarity_score DESC, applied_at ASC
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(job_id)
    .bind(params.skip)
    .bind(params.limit)
    .fetch_all(pool)
    .await?;
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE job_id = $1")
        .bind(job_id)
        .fetch_one(pool)
        .await?;

    Ok(Page::new(rows, total, params))
}

pub async fn list_for_candidate(
    pool: &PgPool,
    candidate_id: i64,
    params: PageParams,
) -> Result<Page<ApplicationRow>, AppError> {
    let params = params.validate()?;
    let rows = sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE candidate_id = $1 ORDER BY applied_at DESC OFFSET $2 LIMIT $3",
    )
    .bind(candidate_id)
    .bind(params.skip)
    .bind(params.limit)
    .fetch_all(pool)
    .await?;
    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE candidate_id = $1")
            .bind(candidate_id)
            .fetch_one(pool)
            .await?;

    Ok(Page::new(rows, total, params))
}

/// Changes only the status; the stored score is left untouched.
pub async fn update_status(
    pool: &PgPool,
    application_id: i64,
    status: ApplicationStatus,
) -> Result<ApplicationRow, AppError> {
    let row = sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $1 WHERE id = $2 RETURNING *",
    )
    .bind(status.as_str())
    .bind(application_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;

    info!("Application {application_id} status -> {status}");
    Ok(row)
}

pub async fn delete_application(pool: &PgPool, application_id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM applications WHERE id = $1")
        .bind(application_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Application {application_id} not found"
        )));
    }
    Ok(())
}

fn normalize_cover_letter(cover_letter: Option<&str>) -> Option<&str> {
    cover_letter.map(str::trim).filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cover_letter_is_dropped() {
        assert_eq!(normalize_cover_letter(Some("  \n")), None);
        assert_eq!(normalize_cover_letter(None), None);
    }

    #[test]
    fn test_cover_letter_is_trimmed() {
        assert_eq!(
            normalize_cover_letter(Some("  I would love to join.\n")),
            Some("I would love to join.")
        );
    }

    #[test]
    fn test_apply_request_cover_letter_optional() {
        let req: ApplyRequest =
            serde_json::from_str(r#"{"candidate_id": 4, "job_id": 9}"#).unwrap();
        assert_eq!(req.candidate_id, 4);
        assert!(req.cover_letter.is_none());
    }
}
