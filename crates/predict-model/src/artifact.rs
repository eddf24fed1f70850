//! Versioned model artifacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use predict_core::error::ModelError;

use crate::forest::ForestClassifier;

/// Immutable output of one training run.
///
/// Carries the fitted classifier together with the exact ordered
/// feature schema it was trained on, so inference can validate parity
/// before predicting. A new training run always produces a new
/// artifact; nothing ever mutates an existing one, which makes
/// concurrent reads by multiple inference callers safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Unique artifact identifier
    pub id: Uuid,
    /// Ordered feature-name schema the model was trained on
    pub schema: Vec<String>,
    /// When the training run completed
    pub trained_at: DateTime<Utc>,
    /// Accuracy on the held-out test partition
    pub accuracy: f64,
    /// Raw output convention, documented once per artifact
    pub label_convention: String,
    /// Fitted classifier state
    pub classifier: ForestClassifier,
}

impl ModelArtifact {
    /// Persist the artifact as a single JSON blob.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let blob =
            serde_json::to_string_pretty(self).map_err(|e| ModelError::Serialization(e.to_string()))?;
        fs::write(path, blob)?;
        Ok(())
    }

    /// Load an artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let blob = fs::read_to_string(path)?;
        serde_json::from_str(&blob).map_err(|e| ModelError::Serialization(e.to_string()))
    }
}
