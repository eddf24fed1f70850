//! Bar ingestion trait definition.

use crate::error::IngestionError;
use crate::types::Bar;
use async_trait::async_trait;

/// Trait for external bar ingestion sources.
///
/// Implementations own their retry policy: transient failures are
/// retried up to a fixed cap, and exhaustion surfaces as a typed error.
/// A source must never return a partial sequence in place of a failure:
/// a silently truncated history would corrupt rolling-window warm-up
/// downstream.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Fetch the most recent bars for an instrument.
    ///
    /// # Arguments
    /// * `symbol` - The instrument to fetch
    /// * `lookback` - Number of bars requested
    ///
    /// # Returns
    /// Bars ordered from oldest to newest.
    async fn fetch_bars(&self, symbol: &str, lookback: usize) -> Result<Vec<Bar>, IngestionError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
