use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::errors::AppError;

/// Admin dashboard counters. User counts exclude admins.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_users: i64,
    pub total_jobs: i64,
    pub active_users: i64,
    pub candidates: i64,
    pub recruiters: i64,
}

pub async fn overview(pool: &PgPool) -> Result<Overview, AppError> {
    Ok(sqlx::query_as::<_, Overview>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users WHERE role <> 'admin')                   AS total_users,
            (SELECT COUNT(*) FROM jobs)                                          AS total_jobs,
            (SELECT COUNT(*) FROM users WHERE role <> 'admin' AND is_active)     AS active_users,
            (SELECT COUNT(*) FROM users WHERE role = 'candidate')                AS candidates,
            (SELECT COUNT(*) FROM users WHERE role = 'recruiter')                AS recruiters
        "#,
    )
    .fetch_one(pool)
    .await?)
}
