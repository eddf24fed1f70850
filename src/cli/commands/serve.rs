//! Serve command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use predict_model::{InferenceAdapter, ModelArtifact};

use crate::cli::ServeArgs;
use crate::server::{self, ServeState};

pub async fn run(args: ServeArgs, _config_path: &Path) -> Result<()> {
    let artifact = ModelArtifact::load(&args.artifact)
        .with_context(|| format!("Failed to load artifact from {}", args.artifact.display()))?;
    info!(artifact = %artifact.id, accuracy = artifact.accuracy, "artifact loaded");

    let state = Arc::new(ServeState {
        artifact,
        adapter: InferenceAdapter::new(),
    });
    server::run(state, &args.bind).await
}
