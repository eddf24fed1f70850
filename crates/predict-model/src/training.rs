//! Offline training pipeline.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;
use uuid::Uuid;

use predict_core::error::ModelError;
use predict_core::traits::Classifier;
use predict_core::types::{Label, LabeledExample, FEATURE_SCHEMA};

use crate::artifact::ModelArtifact;
use crate::forest::{ForestClassifier, ForestConfig};

/// Raw-output convention recorded in every artifact.
const LABEL_CONVENTION: &str = "1=Up,0=Down";

/// Outcome of a training run.
#[derive(Debug)]
pub struct TrainReport {
    pub artifact: ModelArtifact,
    /// Fraction of test-partition predictions matching the true labels
    pub accuracy: f64,
    pub train_size: usize,
    pub test_size: usize,
}

/// Splits labeled examples, fits the classifier, and emits a fresh
/// artifact carrying the exact schema it was trained on.
///
/// The partition is randomized but seeded, so a run is reproducible.
/// The split is deliberately not chronological: that mirrors the
/// upstream methodology, temporal-leakage caveats and all.
#[derive(Debug, Clone)]
pub struct TrainingPipeline {
    split_ratio: f64,
    seed: u64,
    forest: ForestConfig,
}

impl TrainingPipeline {
    /// Create a pipeline with the given train fraction and seed.
    pub fn new(split_ratio: f64, seed: u64) -> Self {
        Self {
            split_ratio,
            seed,
            forest: ForestConfig {
                seed,
                ..Default::default()
            },
        }
    }

    /// Override forest hyperparameters. The split seed still governs
    /// the forest's own sampling.
    pub fn with_forest_config(mut self, config: ForestConfig) -> Self {
        self.forest = ForestConfig {
            seed: self.seed,
            ..config
        };
        self
    }

    /// Train on the given examples and report held-out accuracy.
    ///
    /// Fails closed on fewer than 2 examples or a single-class label
    /// set; it never silently trains on degenerate input.
    pub fn train(&self, examples: &[LabeledExample]) -> Result<TrainReport, ModelError> {
        if !(self.split_ratio > 0.0 && self.split_ratio < 1.0) {
            return Err(ModelError::InvalidParameter(format!(
                "split_ratio must be in (0, 1), got {}",
                self.split_ratio
            )));
        }
        if examples.len() < 2 {
            return Err(ModelError::InsufficientData {
                required: 2,
                available: examples.len(),
            });
        }

        let ups = examples.iter().filter(|e| e.label == Label::Up).count();
        if ups == 0 || ups == examples.len() {
            let label = if ups == 0 { Label::Down } else { Label::Up };
            return Err(ModelError::SingleClassLabels {
                label,
                count: examples.len(),
            });
        }

        let mut indices: Vec<usize> = (0..examples.len()).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let n_train = ((examples.len() as f64 * self.split_ratio).round() as usize)
            .clamp(1, examples.len() - 1);
        let (train_idx, test_idx) = indices.split_at(n_train);

        let x_train: Vec<Vec<f64>> = train_idx
            .iter()
            .map(|&i| examples[i].features.to_row().to_vec())
            .collect();
        let y_train: Vec<Label> = train_idx.iter().map(|&i| examples[i].label).collect();

        let mut classifier = ForestClassifier::new(self.forest.clone());
        classifier.fit(&x_train, &y_train)?;

        let mut correct = 0usize;
        for &i in test_idx {
            let predicted = classifier.predict_row(&examples[i].features.to_row())?;
            if predicted == examples[i].label {
                correct += 1;
            }
        }
        let accuracy = correct as f64 / test_idx.len() as f64;

        info!(
            train = train_idx.len(),
            test = test_idx.len(),
            accuracy,
            "training run complete"
        );

        let artifact = ModelArtifact {
            id: Uuid::new_v4(),
            schema: FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect(),
            trained_at: Utc::now(),
            accuracy,
            label_convention: LABEL_CONVENTION.to_string(),
            classifier,
        };

        Ok(TrainReport {
            artifact,
            accuracy,
            train_size: train_idx.len(),
            test_size: test_idx.len(),
        })
    }
}
