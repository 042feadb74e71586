//! Job-title catalog offered to recruiters. Jobs store the catalog title for the
//! `title_id` they were created with. The catalog may drift from the classifier's
//! trained labels; drift is reported at startup, never rejected.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::matching::classifier::CategoryClassifier;

#[derive(Debug, Clone)]
pub struct JobCatalog {
    titles: Vec<String>,
}

impl JobCatalog {
    pub fn new(titles: Vec<String>) -> Self {
        Self { titles }
    }

    /// Loads a JSON array of title strings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job-title catalog {}", path.display()))?;
        let titles: Vec<String> = serde_json::from_str(&raw)
            .with_context(|| format!("Job-title catalog {} is not a JSON string array", path.display()))?;
        info!("Loaded {} job titles from {}", titles.len(), path.display());
        Ok(Self::new(titles))
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn title(&self, title_id: usize) -> Result<&str, AppError> {
        self.titles
            .get(title_id)
            .map(String::as_str)
            .ok_or_else(|| AppError::Validation(format!("Invalid title id {title_id}")))
    }

    /// Catalog titles the classifier was never trained on. Jobs with these titles
    /// always score 0.0.
    pub fn untrained_titles(&self, classifier: &dyn CategoryClassifier) -> Vec<&str> {
        let labels = classifier.labels();
        self.titles
            .iter()
            .filter(|t| !labels.contains(t))
            .map(String::as_str)
            .collect()
    }

    pub fn report_drift(&self, classifier: &dyn CategoryClassifier) {
        let untrained = self.untrained_titles(classifier);
        if untrained.is_empty() {
            info!("All catalog titles are known to the classifier");
        } else {
            warn!(
                count = untrained.len(),
                "Catalog titles missing from classifier labels (will score 0.0): {}",
                untrained.join(", ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Labels(Vec<String>);

    impl CategoryClassifier for Labels {
        fn labels(&self) -> &[String] {
            &self.0
        }

        fn predict_proba(&self, _text: &str) -> Vec<f64> {
            vec![1.0 / self.0.len() as f64; self.0.len()]
        }
    }

    fn catalog() -> JobCatalog {
        JobCatalog::new(vec![
            "Data Science".to_string(),
            "HR".to_string(),
            "Blockchain".to_string(),
        ])
    }

    #[test]
    fn test_title_by_index() {
        assert_eq!(catalog().title(1).unwrap(), "HR");
    }

    #[test]
    fn test_title_out_of_range_is_validation_error() {
        assert!(matches!(catalog().title(3), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_untrained_titles() {
        let clf = Labels(vec!["Data Science".to_string(), "HR".to_string()]);
        assert_eq!(catalog().untrained_titles(&clf), vec!["Blockchain"]);
    }

    #[test]
    fn test_load_from_json() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"["Java Developer", "Testing"]"#).unwrap();
        let catalog = JobCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.titles(), ["Java Developer", "Testing"]);
    }

    #[test]
    fn test_load_rejects_non_array() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"titles": []}"#).unwrap();
        assert!(JobCatalog::load(file.path()).is_err());
    }
}
