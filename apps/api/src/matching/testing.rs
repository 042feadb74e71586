//! In-memory collaborators for matching tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::matching::classifier::CategoryClassifier;
use crate::matching::extractor::TextExtractor;
use crate::matching::records::RecordStore;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;

#[derive(Default)]
pub struct InMemoryRecords {
    resumes: HashMap<i64, ResumeRow>,
    jobs: HashMap<i64, JobRow>,
}

impl InMemoryRecords {
    pub fn with_resume(mut self, id: i64, storage_path: &str) -> Self {
        self.resumes.insert(
            id,
            ResumeRow {
                id,
                user_id: 100 + id,
                filename: "cv.pdf".to_string(),
                storage_path: storage_path.to_string(),
                uploaded_at: Utc::now(),
            },
        );
        self
    }

    pub fn with_job(mut self, id: i64, title: &str) -> Self {
        self.jobs.insert(
            id,
            JobRow {
                id,
                recruiter_id: 1,
                title: title.to_string(),
                description: None,
                location: "Remote".to_string(),
                employment_type: Some("full-time".to_string()),
                created_at: Utc::now(),
            },
        );
        self
    }
}

#[async_trait]
impl RecordStore for InMemoryRecords {
    async fn resolve_resume(&self, resume_id: i64) -> Result<Option<ResumeRow>, AppError> {
        Ok(self.resumes.get(&resume_id).cloned())
    }

    async fn resolve_job(&self, job_id: i64) -> Result<Option<JobRow>, AppError> {
        Ok(self.jobs.get(&job_id).cloned())
    }
}

/// Reads the stored file as UTF-8 text.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> String {
        std::fs::read_to_string(path)
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

/// Returns the same distribution for every input and counts invocations.
pub struct FixedClassifier {
    pub labels: Vec<String>,
    pub probs: Vec<f64>,
    pub calls: AtomicUsize,
}

impl FixedClassifier {
    /// Data Science 0.1, Software Engineer 0.82, HR 0.08.
    pub fn new() -> Self {
        Self {
            labels: vec![
                "Data Science".to_string(),
                "Software Engineer".to_string(),
                "HR".to_string(),
            ],
            probs: vec![0.1, 0.82, 0.08],
            calls: AtomicUsize::new(0),
        }
    }
}

impl CategoryClassifier for FixedClassifier {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn predict_proba(&self, _text: &str) -> Vec<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.probs.clone()
    }
}
