//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// A single OHLCV observation for one time interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Time-ordered bar sequence for a single instrument.
#[derive(Debug, Clone)]
pub struct BarSeries {
    /// Instrument identifier
    pub symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Create a new empty bar series.
    pub fn new(symbol: String) -> Self {
        Self {
            symbol,
            bars: Vec::new(),
        }
    }

    /// Create a series from pre-collected bars, validating ordering.
    pub fn from_bars(symbol: String, bars: Vec<Bar>) -> Result<Self, DataError> {
        validate_sequence(&bars)?;
        Ok(Self { symbol, bars })
    }

    /// Push a new bar, rejecting non-monotonic timestamps.
    pub fn push(&mut self, bar: Bar) -> Result<(), DataError> {
        if let Some(last) = self.bars.last() {
            if bar.timestamp == last.timestamp {
                return Err(DataError::DuplicateTimestamp {
                    timestamp: bar.timestamp,
                });
            }
            if bar.timestamp < last.timestamp {
                return Err(DataError::OutOfOrder {
                    prev: last.timestamp,
                    next: bar.timestamp,
                });
            }
        }
        self.bars.push(bar);
        Ok(())
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}

/// Check that timestamps are strictly increasing.
pub fn validate_sequence(bars: &[Bar]) -> Result<(), DataError> {
    for pair in bars.windows(2) {
        if pair[1].timestamp == pair[0].timestamp {
            return Err(DataError::DuplicateTimestamp {
                timestamp: pair[0].timestamp,
            });
        }
        if pair[1].timestamp < pair[0].timestamp {
            return Err(DataError::OutOfOrder {
                prev: pair[0].timestamp,
                next: pair[1].timestamp,
            });
        }
    }
    Ok(())
}
