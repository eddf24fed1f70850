//! Data types for the prediction pipeline.

mod bar;
mod features;

pub use bar::{validate_sequence, Bar, BarSeries};
pub use features::{FeatureRecord, Label, LabeledExample, FEATURE_SCHEMA};
