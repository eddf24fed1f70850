//! HTTP serving front for a trained artifact.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use predict_model::{InferenceAdapter, ModelArtifact, PredictionResponse};

/// Shared serving state: one immutable artifact per process.
///
/// Artifacts are never mutated after training, so handlers share the
/// loaded copy behind a plain `Arc` with no locking.
pub struct ServeState {
    pub artifact: ModelArtifact,
    pub adapter: InferenceAdapter,
}

/// Build the prediction router.
pub fn router(state: Arc<ServeState>) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/model", get(model_info))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(state: Arc<ServeState>, bind: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %bind, "serving predictions");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn model_info(State(state): State<Arc<ServeState>>) -> Json<Value> {
    let artifact = &state.artifact;
    Json(json!({
        "id": artifact.id,
        "trained_at": artifact.trained_at,
        "accuracy": artifact.accuracy,
        "schema": artifact.schema,
        "label_convention": artifact.label_convention,
    }))
}

/// POST /predict: a JSON object of feature name to value.
///
/// Success returns `{"prediction": "Up"}` with 200; a snapshot failing
/// schema validation returns `{"error": ...}` with 422.
async fn predict(
    State(state): State<Arc<ServeState>>,
    Json(live): Json<HashMap<String, f64>>,
) -> (StatusCode, Json<PredictionResponse>) {
    let response = state.adapter.respond(&live, &state.artifact);
    let status = match &response {
        PredictionResponse::Prediction { .. } => StatusCode::OK,
        PredictionResponse::Error { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(response))
}
