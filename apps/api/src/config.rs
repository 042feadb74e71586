use anyhow::{bail, Context, Result};

/// Where resume documents live.
#[derive(Debug, Clone)]
pub enum DocumentStoreConfig {
    Local {
        upload_dir: String,
    },
    S3 {
        bucket: String,
        endpoint: String,
        access_key_id: String,
        secret_access_key: String,
    },
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub classifier_model_path: String,
    pub job_titles_path: String,
    pub document_store: DocumentStoreConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            classifier_model_path: env_or("CLASSIFIER_MODEL_PATH", "ml/models/resume_classifier.json"),
            job_titles_path: env_or("JOB_TITLES_PATH", "core/jobs.json"),
            document_store: document_store_from_env()?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn document_store_from_env() -> Result<DocumentStoreConfig> {
    match env_or("DOCUMENT_STORE", "local").as_str() {
        "local" => Ok(DocumentStoreConfig::Local {
            upload_dir: env_or("UPLOAD_DIR", "uploads/resumes"),
        }),
        "s3" => Ok(DocumentStoreConfig::S3 {
            bucket: require_env("S3_BUCKET")?,
            endpoint: require_env("S3_ENDPOINT")?,
            access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
        }),
        other => bail!("DOCUMENT_STORE must be 'local' or 's3', got '{other}'"),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
