use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A candidate's application to a job. `similarity_score` is computed once at
/// creation and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: i64,
    pub job_id: i64,
    pub candidate_id: i64,
    pub resume_id: Option<i64>,
    pub cover_letter: Option<String>,
    pub similarity_score: f64,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(ApplicationStatus::Applied),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("unknown application status '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_known_values() {
        assert_eq!("accepted".parse(), Ok(ApplicationStatus::Accepted));
        assert_eq!("applied".parse(), Ok(ApplicationStatus::Applied));
    }

    #[test]
    fn test_status_rejects_unknown_and_case_variants() {
        assert!("Accepted".parse::<ApplicationStatus>().is_err());
        assert!("shortlisted".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_serde_is_lowercase() {
        let json = serde_json::to_string(&ApplicationStatus::Rejected).unwrap();
        assert_eq!(json, "\"rejected\"");
    }
}
