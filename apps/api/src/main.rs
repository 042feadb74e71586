mod board;
mod catalog;
mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod storage;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::catalog::JobCatalog;
use crate::config::{Config, DocumentStoreConfig};
use crate::db::create_pool;
use crate::matching::{NaiveBayesClassifier, PdfTextExtractor, PgRecordStore, SimilarityScorer};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{DocumentStore, LocalDocumentStore, S3DocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Board API v{}", env!("CARGO_PKG_VERSION"));

    // Load the classifier once; without it no application can be scored, so a
    // missing or corrupt artifact aborts startup.
    let classifier = NaiveBayesClassifier::load(&config.classifier_model_path).with_context(|| {
        format!(
            "Cannot start without classifier artifact (CLASSIFIER_MODEL_PATH={})",
            config.classifier_model_path
        )
    })?;
    let classifier = Arc::new(classifier);

    let catalog = JobCatalog::load(&config.job_titles_path)?;
    catalog.report_drift(classifier.as_ref());

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    let documents: Arc<dyn DocumentStore> = match &config.document_store {
        DocumentStoreConfig::Local { upload_dir } => {
            info!("Resume documents served from {upload_dir}");
            Arc::new(LocalDocumentStore::new(upload_dir))
        }
        DocumentStoreConfig::S3 {
            bucket,
            endpoint,
            access_key_id,
            secret_access_key,
        } => {
            let s3 = build_s3_client(endpoint, access_key_id, secret_access_key).await;
            info!("Resume documents served from s3://{bucket}");
            Arc::new(S3DocumentStore::new(s3, bucket.clone()))
        }
    };

    let scorer = SimilarityScorer::new(
        Arc::new(PgRecordStore::new(db.clone())),
        documents,
        Arc::new(PdfTextExtractor),
        classifier,
    );

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        catalog: Arc::new(catalog),
        scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(
    endpoint: &str,
    access_key_id: &str,
    secret_access_key: &str,
) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        access_key_id,
        secret_access_key,
        None,
        None,
        "jobboard-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
