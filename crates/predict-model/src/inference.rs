//! Schema-validated inference over a model artifact.

use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

use predict_core::error::ModelError;
use predict_core::traits::Classifier;
use predict_core::types::Label;

use crate::artifact::ModelArtifact;

/// Stateless adapter from a live feature snapshot to a label.
///
/// Every call validates the snapshot against the artifact's recorded
/// schema and reassembles the row in the artifact's declared column
/// order, which is part of the model contract.
#[derive(Debug, Clone, Default)]
pub struct InferenceAdapter;

impl InferenceAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Predict the next-period direction for a live feature snapshot.
    ///
    /// A missing schema field fails with [`ModelError::SchemaMismatch`]
    /// naming that field; unexpected extra fields are ignored but
    /// logged as an anomaly.
    pub fn predict(
        &self,
        live_features: &HashMap<String, f64>,
        artifact: &ModelArtifact,
    ) -> Result<Label, ModelError> {
        let mut row = Vec::with_capacity(artifact.schema.len());
        for field in &artifact.schema {
            match live_features.get(field) {
                Some(&value) => row.push(value),
                None => {
                    return Err(ModelError::SchemaMismatch {
                        field: field.clone(),
                    })
                }
            }
        }

        for field in live_features.keys() {
            if !artifact.schema.iter().any(|s| s == field) {
                warn!(field = %field, "ignoring unexpected feature field");
            }
        }

        artifact.classifier.predict_row(&row)
    }

    /// Service-boundary wrapper: internal errors become a structured
    /// response exactly once, here at the outermost edge.
    pub fn respond(
        &self,
        live_features: &HashMap<String, f64>,
        artifact: &ModelArtifact,
    ) -> PredictionResponse {
        match self.predict(live_features, artifact) {
            Ok(label) => PredictionResponse::Prediction { prediction: label },
            Err(e) => PredictionResponse::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Wire response: `{"prediction": "Up"}` or `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PredictionResponse {
    Prediction { prediction: Label },
    Error { error: String },
}
