//! Similarity Scorer: probability mass the classifier assigns to a job's title
//! category given the text of a candidate's resume.
//!
//! Flow for `evaluate(resume_id, job_id)`:
//! 1. resolve resume (NotFound propagates)
//! 2. fetch + extract text; empty text short-circuits to 0.0 without inference
//! 3. resolve job (NotFound propagates)
//! 4. classify, 5. pick the job title's probability, or 0.0 if the model never saw it
//!
//! Everything except the two NotFound cases degrades to 0.0. `ScoreOutcome` keeps the
//! two zero causes apart for logging; callers that only want the number use `score`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::matching::classifier::CategoryClassifier;
use crate::matching::extractor::TextExtractor;
use crate::matching::records::RecordStore;
use crate::models::resume::ResumeRow;
use crate::storage::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreOutcome {
    Scored(f64),
    /// No extractable text in the resume document (or the document was unreadable).
    EmptyText,
    /// The job title is not in the classifier's trained category set.
    UnknownCategory,
}

impl ScoreOutcome {
    pub fn value(&self) -> f64 {
        match self {
            ScoreOutcome::Scored(p) => *p,
            ScoreOutcome::EmptyText | ScoreOutcome::UnknownCategory => 0.0,
        }
    }

    /// Log tag for the outcome.
    pub fn tag(&self) -> &'static str {
        match self {
            ScoreOutcome::Scored(_) => "scored",
            ScoreOutcome::EmptyText => "empty_text",
            ScoreOutcome::UnknownCategory => "unknown_category",
        }
    }
}

/// Constructed once at startup and shared through `AppState`.
#[derive(Clone)]
pub struct SimilarityScorer {
    records: Arc<dyn RecordStore>,
    documents: Arc<dyn DocumentStore>,
    extractor: Arc<dyn TextExtractor>,
    classifier: Arc<dyn CategoryClassifier>,
}

impl SimilarityScorer {
    pub fn new(
        records: Arc<dyn RecordStore>,
        documents: Arc<dyn DocumentStore>,
        extractor: Arc<dyn TextExtractor>,
        classifier: Arc<dyn CategoryClassifier>,
    ) -> Self {
        Self {
            records,
            documents,
            extractor,
            classifier,
        }
    }

    pub fn classifier(&self) -> &dyn CategoryClassifier {
        self.classifier.as_ref()
    }

    /// `score_application`: a float in [0.0, 1.0], or NotFound for an unknown
    /// resume or job.
    pub async fn score(&self, resume_id: i64, job_id: i64) -> Result<f64, AppError> {
        Ok(self.evaluate(resume_id, job_id).await?.value())
    }

    pub async fn evaluate(&self, resume_id: i64, job_id: i64) -> Result<ScoreOutcome, AppError> {
        let resume = self
            .records
            .resolve_resume(resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

        let text = self.extract_text(&resume).await?;
        if text.is_empty() {
            let outcome = ScoreOutcome::EmptyText;
            info!(resume_id, job_id, outcome = outcome.tag(), "Resume has no text; score 0.0");
            return Ok(outcome);
        }

        let job = self
            .records
            .resolve_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

        let classifier = Arc::clone(&self.classifier);
        let title = job.title.clone();
        let outcome =
            tokio::task::spawn_blocking(move || probability_for_title(classifier.as_ref(), &text, &title))
                .await
                .map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("spawn_blocking failed in classification: {e}"))
                })?;

        match outcome {
            ScoreOutcome::UnknownCategory => warn!(
                resume_id,
                job_id,
                title = %job.title,
                outcome = outcome.tag(),
                "Job title not in trained category set; score 0.0"
            ),
            _ => info!(
                resume_id,
                job_id,
                outcome = outcome.tag(),
                score = outcome.value(),
                "Scored resume against job"
            ),
        }
        Ok(outcome)
    }

    /// Fetches the resume document and extracts its text off the async executor.
    /// Storage failures are absorbed as empty text.
    async fn extract_text(&self, resume: &ResumeRow) -> Result<String, AppError> {
        let document = match self.documents.fetch(&resume.storage_path).await {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    resume_id = resume.id,
                    location = %resume.storage_path,
                    "Resume document unavailable: {e}"
                );
                return Ok(String::new());
            }
        };

        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extractor.extract(document.path()))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in text extraction: {e}"))
            })?;

        debug!(resume_id = resume.id, chars = text.len(), "Resume text ready");
        Ok(text)
    }
}

/// Exact, case-sensitive lookup of `title` in the trained label set. Unknown titles
/// skip inference entirely.
pub fn probability_for_title(
    classifier: &dyn CategoryClassifier,
    text: &str,
    title: &str,
) -> ScoreOutcome {
    if !classifier.labels().iter().any(|label| label == title) {
        return ScoreOutcome::UnknownCategory;
    }
    classifier
        .distribution(text)
        .into_iter()
        .find(|(label, _)| *label == title)
        .map(|(_, p)| ScoreOutcome::Scored(p))
        .unwrap_or(ScoreOutcome::UnknownCategory)
}
