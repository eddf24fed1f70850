//! Error types for the prediction pipeline.

use thiserror::Error;

use crate::types::Label;

/// Top-level pipeline error.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Ingestion error: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Bar sequence errors.
///
/// A sequence that fails these checks is rejected whole, before any
/// feature computation runs on it.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("duplicate timestamp {timestamp} in bar sequence")]
    DuplicateTimestamp { timestamp: i64 },

    #[error("bar sequence out of order: {prev} followed by {next}")]
    OutOfOrder { prev: i64, next: i64 },

    #[error("no data available for the requested instrument")]
    NoDataAvailable,

    #[error("parse error: {0}")]
    ParseError(String),
}

/// Ingestion collaborator errors.
///
/// Only the transient subset is eligible for retry; a malformed payload
/// is permanent and surfaces immediately.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("request timed out")]
    Timeout,

    #[error("rate limited by the exchange")]
    RateLimited,

    #[error("server error: HTTP {status}")]
    ServerError { status: u16 },

    #[error("request rejected: HTTP {status}")]
    Rejected { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("giving up on {symbol} after {attempts} attempts: {last}")]
    RetriesExhausted {
        symbol: String,
        attempts: u32,
        last: String,
    },
}

impl IngestionError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::RateLimited | Self::ServerError { .. } | Self::Network(_)
        )
    }
}

/// Training and inference errors.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("insufficient data: need at least {required} examples, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("insufficient data: all {count} examples share the label {label}")]
    SingleClassLabels { label: Label, count: usize },

    #[error("schema mismatch: live features missing \"{field}\"")]
    SchemaMismatch { field: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("classifier has not been fitted")]
    NotFitted,

    #[error("artifact serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type PredictResult<T> = Result<T, PredictError>;
