//! Feature engine: bars in, indicator-augmented records out.

use predict_core::error::DataError;
use predict_core::types::{validate_sequence, Bar, FeatureRecord};

use crate::indicators::{Rsi, Sma};

/// Short moving-average window.
pub const MA_SHORT_PERIOD: usize = 10;
/// Long moving-average window. Dominates the warm-up.
pub const MA_LONG_PERIOD: usize = 50;
/// RSI window, in deltas.
pub const RSI_PERIOD: usize = 14;

/// Number of leading bars that can never produce a record.
pub const WARMUP_BARS: usize = MA_LONG_PERIOD - 1;

/// Pure mapping from an ordered bar sequence to feature records.
///
/// The engine holds no state across calls: the same input sequence
/// always yields the same output sequence. Rows where any indicator is
/// still warming up are excluded entirely (no forward-fill, no
/// zero-fill), so early rows can never enter training with fabricated
/// values.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine;

impl IndicatorEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute feature records for every fully-warmed-up bar.
    ///
    /// Rejects the whole sequence with [`DataError`] when timestamps are
    /// duplicated or out of order. Sequences shorter than
    /// [`MA_LONG_PERIOD`] yield an empty vector, not an error.
    pub fn compute(&self, bars: &[Bar]) -> Result<Vec<FeatureRecord>, DataError> {
        validate_sequence(bars)?;

        if bars.len() < MA_LONG_PERIOD {
            return Ok(vec![]);
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let ma_short = Sma::new(MA_SHORT_PERIOD).calculate(&closes);
        let ma_long = Sma::new(MA_LONG_PERIOD).calculate(&closes);
        let rsi = Rsi::new(RSI_PERIOD).calculate(&closes);

        // Each indicator vector starts at its own warm-up offset; the
        // long MA starts last, so records exist from WARMUP_BARS onward.
        let records = bars
            .iter()
            .enumerate()
            .skip(WARMUP_BARS)
            .map(|(t, bar)| FeatureRecord {
                timestamp: bar.timestamp,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                ma_10: ma_short[t - (MA_SHORT_PERIOD - 1)],
                ma_50: ma_long[t - (MA_LONG_PERIOD - 1)],
                rsi_14: rsi[t - RSI_PERIOD],
            })
            .collect();

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 60 daily bars, close rising linearly 100..159, constant volume.
    fn linear_bars() -> Vec<Bar> {
        (0..60)
            .map(|i| {
                let close = 100.0 + i as f64;
                Bar::new(i as i64 * 86_400_000, close - 0.5, close + 1.0, close - 1.0, close, 1000.0)
            })
            .collect()
    }

    #[test]
    fn test_short_sequences_yield_no_records() {
        let engine = IndicatorEngine::new();
        for len in [0, 1, 14, 49] {
            let bars: Vec<Bar> = linear_bars().into_iter().take(len).collect();
            assert!(engine.compute(&bars).unwrap().is_empty(), "len {}", len);
        }
    }

    #[test]
    fn test_fifty_bars_yield_one_record() {
        let engine = IndicatorEngine::new();
        let bars: Vec<Bar> = linear_bars().into_iter().take(50).collect();
        let records = engine.compute(&bars).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, bars[49].timestamp);
    }

    #[test]
    fn test_linear_rise_scenario() {
        let engine = IndicatorEngine::new();
        let bars = linear_bars();
        let records = engine.compute(&bars).unwrap();

        // 60 bars minus 49 warm-up rows.
        assert_eq!(records.len(), 11);

        let last = records.last().unwrap();
        // Mean of closes 150..159.
        assert!((last.ma_10 - 154.5).abs() < 1e-10);
        // Mean of closes 110..159.
        assert!((last.ma_50 - 134.5).abs() < 1e-10);

        // Monotonic rise means zero losses, so RSI is pinned to 100.
        for record in &records {
            assert_eq!(record.rsi_14, 100.0);
        }
    }

    #[test]
    fn test_record_timestamps_track_bars() {
        let engine = IndicatorEngine::new();
        let bars = linear_bars();
        let records = engine.compute(&bars).unwrap();

        for (record, bar) in records.iter().zip(bars.iter().skip(WARMUP_BARS)) {
            assert_eq!(record.timestamp, bar.timestamp);
            assert_eq!(record.close, bar.close);
            assert_eq!(record.volume, bar.volume);
        }
    }

    #[test]
    fn test_compute_is_idempotent() {
        let engine = IndicatorEngine::new();
        let bars = linear_bars();
        let first = engine.compute(&bars).unwrap();
        let second = engine.compute(&bars).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_unordered_sequence() {
        let engine = IndicatorEngine::new();
        let mut bars = linear_bars();
        bars.swap(10, 11);
        assert!(engine.compute(&bars).is_err());
    }

    #[test]
    fn test_rejects_duplicate_timestamp() {
        let engine = IndicatorEngine::new();
        let mut bars = linear_bars();
        bars[20].timestamp = bars[19].timestamp;
        assert!(engine.compute(&bars).is_err());
    }
}
