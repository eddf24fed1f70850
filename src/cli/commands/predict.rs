//! Predict command implementation.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use predict_model::{InferenceAdapter, ModelArtifact, PredictionResponse};

use crate::cli::PredictArgs;

pub async fn run(args: PredictArgs, _config_path: &Path) -> Result<()> {
    let artifact = ModelArtifact::load(&args.artifact)
        .with_context(|| format!("Failed to load artifact from {}", args.artifact.display()))?;
    info!(artifact = %artifact.id, accuracy = artifact.accuracy, "artifact loaded");

    let live_features: HashMap<String, f64> =
        serde_json::from_str(&args.features).context("Features must be a JSON object of name -> number")?;

    // The adapter converts internal errors to a structured response at
    // this boundary; the process still exits non-zero on failure.
    let response = InferenceAdapter::new().respond(&live_features, &artifact);
    println!("{}", serde_json::to_string(&response)?);

    if let PredictionResponse::Error { error } = response {
        anyhow::bail!(error);
    }
    Ok(())
}
