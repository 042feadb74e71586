use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::config::DocumentStoreConfig;
use crate::db::ping;
use crate::state::AppState;

/// GET /health
/// Service version, database reachability and the size of the loaded category set.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let database = if ping(&state.db).await { "ok" } else { "unavailable" };
    let document_store = match state.config.document_store {
        DocumentStoreConfig::Local { .. } => "local",
        DocumentStoreConfig::S3 { .. } => "s3",
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobboard-api",
        "database": database,
        "document_store": document_store,
        "classifier_labels": state.scorer.classifier().labels().len(),
    }))
}
