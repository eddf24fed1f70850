//! Core types and traits for the prediction pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries)
//! - Feature records, labels, and the fixed feature schema
//! - Traits for classifiers and bar ingestion sources
//! - The error taxonomy shared across the pipeline

pub mod error;
pub mod traits;
pub mod types;

pub use error::{PredictError, PredictResult};
pub use traits::*;
pub use types::*;
