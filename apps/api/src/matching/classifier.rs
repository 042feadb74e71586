//! Category Classifier: a pre-fit naive Bayes text classifier over job-title labels.
//!
//! The artifact is a JSON dump of a fitted vectorizer + naive Bayes pipeline. It is
//! loaded exactly once at startup and shared read-only (`Arc<dyn CategoryClassifier>`)
//! for the lifetime of the process. Nothing here mutates after `load`, so concurrent
//! `predict_proba` calls need no locking.
//!
//! Inference:
//! 1. tokenize → term counts over the fitted vocabulary
//! 2. optional sublinear tf, idf weighting, row normalization
//! 3. jll_c = x · feature_log_prob_c (+ class_log_prior_c for multinomial)
//! 4. softmax(jll) via log-sum-exp

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read classifier artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse classifier artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid classifier artifact: {0}")]
    Invalid(String),
}

/// The seam the scorer depends on. Implementations must be safe for concurrent
/// read-only use; both methods are blocking and CPU-bound.
pub trait CategoryClassifier: Send + Sync {
    /// The closed, ordered category set the model was trained on.
    fn labels(&self) -> &[String];

    /// Probability distribution aligned with `labels()`.
    fn predict_proba(&self, text: &str) -> Vec<f64>;

    /// (label, probability) pairs in label order.
    fn distribution(&self, text: &str) -> Vec<(&str, f64)> {
        self.labels()
            .iter()
            .map(String::as_str)
            .zip(self.predict_proba(text))
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Artifact format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerParams {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NaiveBayesKind {
    Complement,
    Multinomial,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NaiveBayesParams {
    pub kind: NaiveBayesKind,
    pub feature_log_prob: Vec<Vec<f64>>,
    pub class_log_prior: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierArtifact {
    pub classes: Vec<String>,
    pub vectorizer: VectorizerParams,
    pub model: NaiveBayesParams,
}

// ────────────────────────────────────────────────────────────────────────────
// Loaded classifier
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct NaiveBayesClassifier {
    classes: Vec<String>,
    vectorizer: VectorizerParams,
    model: NaiveBayesParams,
    n_features: usize,
}

impl NaiveBayesClassifier {
    /// Reads and validates the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let classifier = Self::from_json(&raw)?;
        info!(
            "Loaded classifier from {} ({} classes, {} features, {:?})",
            path.display(),
            classifier.classes.len(),
            classifier.n_features,
            classifier.model.kind
        );
        Ok(classifier)
    }

    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let artifact: ClassifierArtifact = serde_json::from_str(raw)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self, ClassifierError> {
        let ClassifierArtifact {
            classes,
            vectorizer,
            model,
        } = artifact;

        if classes.is_empty() {
            return Err(invalid("classes must not be empty"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = classes.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(invalid(format!("duplicate class label '{dup}'")));
        }
        if model.feature_log_prob.len() != classes.len() {
            return Err(invalid(format!(
                "feature_log_prob has {} rows for {} classes",
                model.feature_log_prob.len(),
                classes.len()
            )));
        }
        if model.class_log_prior.len() != classes.len() {
            return Err(invalid(format!(
                "class_log_prior has {} entries for {} classes",
                model.class_log_prior.len(),
                classes.len()
            )));
        }

        let n_features = model.feature_log_prob[0].len();
        if model.feature_log_prob.iter().any(|row| row.len() != n_features) {
            return Err(invalid("feature_log_prob rows differ in length"));
        }
        if let Some((term, col)) = vectorizer
            .vocabulary
            .iter()
            .find(|(_, col)| **col >= n_features)
        {
            return Err(invalid(format!(
                "vocabulary term '{term}' maps to column {col}, model has {n_features} features"
            )));
        }
        // Multi-word terms come from n-gram vectorizers; single-token inference never hits them.
        if let Some(term) = vectorizer
            .vocabulary
            .keys()
            .find(|term| term.chars().any(char::is_whitespace))
        {
            return Err(invalid(format!(
                "vocabulary term '{term}' spans several tokens; only unigram vectorizers are supported"
            )));
        }
        if let Some(idf) = &vectorizer.idf {
            if idf.len() != n_features {
                return Err(invalid(format!(
                    "idf has {} entries, model has {n_features} features",
                    idf.len()
                )));
            }
        }

        let weights_finite = model
            .feature_log_prob
            .iter()
            .flatten()
            .chain(model.class_log_prior.iter())
            .chain(vectorizer.idf.iter().flatten())
            .all(|w| w.is_finite());
        if !weights_finite {
            return Err(invalid("model weights must be finite"));
        }

        Ok(Self {
            classes,
            vectorizer,
            model,
            n_features,
        })
    }

    /// Sparse tf-idf row for `text` as (column, weight) pairs.
    fn vectorize(&self, text: &str) -> Vec<(usize, f64)> {
        let params = &self.vectorizer;
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text, params.lowercase) {
            if let Some(&col) = params.vocabulary.get(&token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut row: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| {
                let tf = if params.sublinear_tf { 1.0 + tf.ln() } else { tf };
                let idf = params.idf.as_ref().map(|idf| idf[col]).unwrap_or(1.0);
                (col, tf * idf)
            })
            .collect();
        // Stable column order keeps the dot products bit-for-bit reproducible.
        row.sort_unstable_by_key(|(col, _)| *col);

        let norm = match params.norm {
            Some(Norm::L2) => row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => row.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            for (_, w) in row.iter_mut() {
                *w /= norm;
            }
        }
        row
    }

    fn joint_log_likelihood(&self, row: &[(usize, f64)]) -> Vec<f64> {
        let add_prior = match self.model.kind {
            NaiveBayesKind::Multinomial => true,
            NaiveBayesKind::Complement => self.classes.len() == 1,
        };
        self.model
            .feature_log_prob
            .iter()
            .zip(&self.model.class_log_prior)
            .map(|(flp, prior)| {
                let dot: f64 = row.iter().map(|&(col, w)| w * flp[col]).sum();
                if add_prior {
                    dot + prior
                } else {
                    dot
                }
            })
            .collect()
    }
}

impl CategoryClassifier for NaiveBayesClassifier {
    fn labels(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, text: &str) -> Vec<f64> {
        let row = self.vectorize(text);
        softmax(&self.joint_log_likelihood(&row))
    }
}

fn invalid(msg: impl Into<String>) -> ClassifierError {
    ClassifierError::Invalid(msg.into())
}

/// Maximal runs of word characters (alphanumeric or `_`) of at least two chars.
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    let text = if lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(String::from)
        .collect()
}

fn softmax(jll: &[f64]) -> Vec<f64> {
    let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let log_sum = max + jll.iter().map(|v| (v - max).exp()).sum::<f64>().ln();
    jll.iter().map(|v| (v - log_sum).exp()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact_json(kind: &str) -> String {
        format!(
            r#"{{
                "classes": ["Data Science", "Software Engineer", "HR"],
                "vectorizer": {{
                    "vocabulary": {{"python": 0, "distributed": 1, "systems": 2, "recruiting": 3, "statistics": 4}},
                    "idf": [1.2, 1.5, 1.5, 2.0, 1.8],
                    "lowercase": true,
                    "sublinear_tf": false,
                    "norm": "l2"
                }},
                "model": {{
                    "kind": "{kind}",
                    "feature_log_prob": [
                        [-1.2, -2.5, -2.4, -3.0, -0.9],
                        [-1.0, -0.9, -0.9, -3.2, -2.6],
                        [-2.6, -2.8, -2.7, -0.7, -2.5]
                    ],
                    "class_log_prior": [-1.0986, -1.0986, -1.0986]
                }}
            }}"#
        )
    }

    fn classifier() -> NaiveBayesClassifier {
        NaiveBayesClassifier::from_json(&artifact_json("complement")).unwrap()
    }

    #[test]
    fn test_tokenize_matches_word_runs() {
        let tokens = tokenize("C++ and Python_3, a B2B SaaS!", true);
        assert_eq!(tokens, vec!["and", "python_3", "b2b", "saas"]);
    }

    #[test]
    fn test_tokenize_preserves_case_when_configured() {
        assert_eq!(tokenize("Rust Go", false), vec!["Rust", "Go"]);
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let clf = classifier();
        let probs =
            clf.predict_proba("experienced software engineer skilled in python and distributed systems");
        assert_eq!(probs.len(), 3);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_engineering_text_ranks_software_engineer_first() {
        let clf = classifier();
        let dist = clf.distribution("python distributed systems distributed systems");
        let best = dist
            .iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        assert_eq!(best.0, "Software Engineer");
    }

    #[test]
    fn test_out_of_vocabulary_text_is_uniform_for_complement() {
        let clf = classifier();
        let probs = clf.predict_proba("zzz qqq");
        for p in probs {
            assert!((p - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_multinomial_uses_class_prior() {
        let mut json = artifact_json("multinomial");
        json = json.replace(
            "[-1.0986, -1.0986, -1.0986]",
            "[-0.1053, -2.9957, -2.9957]",
        );
        let clf = NaiveBayesClassifier::from_json(&json).unwrap();
        let probs = clf.predict_proba("");
        assert!(probs[0] > probs[1]);
        assert!((probs[1] - probs[2]).abs() < 1e-12);
    }

    #[test]
    fn test_distribution_pairs_labels_in_order() {
        let clf = classifier();
        let dist = clf.distribution("recruiting recruiting");
        let labels: Vec<&str> = dist.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["Data Science", "Software Engineer", "HR"]);
        assert!(dist[2].1 > dist[0].1 && dist[2].1 > dist[1].1);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let clf = classifier();
        let text = "statistics python recruiting systems";
        assert_eq!(clf.predict_proba(text), clf.predict_proba(text));
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let json = artifact_json("complement").replace("[-2.6, -2.8, -2.7, -0.7, -2.5]", "[-2.6]");
        let err = NaiveBayesClassifier::from_json(&json).unwrap_err();
        assert!(matches!(err, ClassifierError::Invalid(_)), "{err}");
    }

    #[test]
    fn test_rejects_vocabulary_out_of_range() {
        let json = artifact_json("complement").replace("\"statistics\": 4", "\"statistics\": 9");
        assert!(matches!(
            NaiveBayesClassifier::from_json(&json),
            Err(ClassifierError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_ngram_vocabulary() {
        let json = artifact_json("complement").replace("\"statistics\": 4", "\"machine learning\": 4");
        let err = NaiveBayesClassifier::from_json(&json).unwrap_err();
        assert!(matches!(err, ClassifierError::Invalid(_)), "{err}");
        assert!(err.to_string().contains("machine learning"));
    }

    #[test]
    fn test_rejects_duplicate_labels() {
        let json = artifact_json("complement").replace("\"HR\"", "\"Data Science\"");
        assert!(matches!(
            NaiveBayesClassifier::from_json(&json),
            Err(ClassifierError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            NaiveBayesClassifier::from_json("{not json"),
            Err(ClassifierError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = NaiveBayesClassifier::load("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, ClassifierError::Io { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), artifact_json("complement")).unwrap();
        let clf = NaiveBayesClassifier::load(file.path()).unwrap();
        assert_eq!(clf.labels().len(), 3);
    }
}
