//! Classifier trait definition.

use crate::error::ModelError;
use crate::types::Label;

/// Opaque binary classifier capability.
///
/// The pipeline never depends on a particular algorithm; anything that
/// can fit a feature matrix against labels and predict a single row
/// satisfies the contract.
pub trait Classifier: Send + Sync {
    /// Fit the classifier on a feature matrix and label vector.
    ///
    /// Rows of `features` and entries of `labels` correspond by index.
    fn fit(&mut self, features: &[Vec<f64>], labels: &[Label]) -> Result<(), ModelError>;

    /// Predict the label for a single feature row.
    ///
    /// Fails with [`ModelError::NotFitted`] before a successful `fit`.
    fn predict_row(&self, row: &[f64]) -> Result<Label, ModelError>;

    /// Get the classifier name.
    fn name(&self) -> &str;
}
