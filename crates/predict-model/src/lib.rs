//! Model training and serving for the prediction pipeline.
//!
//! [`TrainingPipeline`] fits the forest on labeled examples and emits an
//! immutable [`ModelArtifact`]; [`InferenceAdapter`] validates a live
//! feature snapshot against the artifact's schema and predicts.

mod artifact;
mod forest;
mod inference;
mod training;

pub use artifact::ModelArtifact;
pub use forest::{ForestClassifier, ForestConfig};
pub use inference::{InferenceAdapter, PredictionResponse};
pub use training::{TrainReport, TrainingPipeline};
