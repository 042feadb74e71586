use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A posted job. `title` is always drawn from the job-title catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub recruiter_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub employment_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
