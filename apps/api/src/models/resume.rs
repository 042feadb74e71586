use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A candidate's uploaded resume. `storage_path` is the document store location.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    pub user_id: i64,
    pub filename: String,
    pub storage_path: String,
    pub uploaded_at: DateTime<Utc>,
}
