//! Leakage-safe labeling of feature records.

use predict_core::types::{FeatureRecord, Label, LabeledExample};

/// Derives the supervised target from the next bar's close.
///
/// Example `i` pairs the features of record `i` with the direction of
/// record `i + 1`'s close; the feature side never looks forward. An
/// unchanged close counts as Down: the label uses strict inequality, so
/// "flat" silently folds into the negative class. The last record has
/// no known outcome and is dropped.
#[derive(Debug, Clone, Default)]
pub struct LabelingEngine;

impl LabelingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Label an ordered feature sequence.
    ///
    /// Output length is `features.len() - 1`, or 0 for sequences of
    /// length at most 1. Chronological order is preserved; any
    /// shuffling belongs to the train/test split, not here.
    pub fn label(&self, features: &[FeatureRecord]) -> Vec<LabeledExample> {
        features
            .windows(2)
            .map(|pair| LabeledExample {
                features: pair[0],
                label: if pair[1].close > pair[0].close {
                    Label::Up
                } else {
                    Label::Down
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: i64, close: f64) -> FeatureRecord {
        FeatureRecord {
            timestamp,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
            ma_10: close,
            ma_50: close,
            rsi_14: 50.0,
        }
    }

    #[test]
    fn test_output_length_is_input_minus_one() {
        let engine = LabelingEngine::new();
        let records: Vec<FeatureRecord> = (0..5).map(|i| record(i, 100.0 + i as f64)).collect();
        assert_eq!(engine.label(&records).len(), 4);
    }

    #[test]
    fn test_degenerate_inputs_yield_nothing() {
        let engine = LabelingEngine::new();
        assert!(engine.label(&[]).is_empty());
        assert!(engine.label(&[record(0, 100.0)]).is_empty());
    }

    #[test]
    fn test_direction_and_tie_break() {
        let engine = LabelingEngine::new();
        let records = vec![
            record(0, 100.0),
            record(1, 101.0), // up from 100
            record(2, 101.0), // unchanged: folds into Down
            record(3, 99.0),  // down
        ];
        let examples = engine.label(&records);

        assert_eq!(examples[0].label, Label::Up);
        assert_eq!(examples[1].label, Label::Down);
        assert_eq!(examples[2].label, Label::Down);
    }

    #[test]
    fn test_features_never_look_ahead() {
        // Example i must carry record i's values, not record i+1's.
        let engine = LabelingEngine::new();
        let records: Vec<FeatureRecord> = (0..4).map(|i| record(i, 100.0 + i as f64)).collect();
        let examples = engine.label(&records);

        for (i, example) in examples.iter().enumerate() {
            assert_eq!(example.features, records[i]);
        }
    }

    #[test]
    fn test_chronological_order_preserved() {
        let engine = LabelingEngine::new();
        let records: Vec<FeatureRecord> = (0..10).map(|i| record(i, 100.0)).collect();
        let examples = engine.label(&records);

        for pair in examples.windows(2) {
            assert!(pair[0].features.timestamp < pair[1].features.timestamp);
        }
    }

    #[test]
    fn test_labeling_is_idempotent() {
        let engine = LabelingEngine::new();
        let records: Vec<FeatureRecord> =
            (0..8).map(|i| record(i, 100.0 + (i as f64 * 0.7).sin())).collect();
        assert_eq!(engine.label(&records), engine.label(&records));
    }
}
