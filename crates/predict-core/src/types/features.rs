//! Feature records and supervised labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered feature schema every model is trained against.
///
/// Column order is part of the model contract: the training matrix and
/// every inference row are assembled in exactly this order.
pub const FEATURE_SCHEMA: [&str; 8] = [
    "open", "high", "low", "close", "volume", "MA_10", "MA_50", "RSI_14",
];

/// One bar together with its derived indicators.
///
/// Records exist only at indices where every rolling window is fully
/// populated; warm-up rows are never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// 10-bar simple moving average of close
    pub ma_10: f64,
    /// 50-bar simple moving average of close
    pub ma_50: f64,
    /// 14-period RSI
    pub rsi_14: f64,
}

impl FeatureRecord {
    /// Feature values in [`FEATURE_SCHEMA`] order, timestamp excluded.
    pub fn to_row(&self) -> [f64; 8] {
        [
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.ma_10,
            self.ma_50,
            self.rsi_14,
        ]
    }
}

/// Directional movement of the next bar's close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Up,
    Down,
}

impl Label {
    /// Wire convention recorded per artifact: 1 maps to Up, 0 to Down.
    pub fn from_raw(raw: u8) -> Self {
        if raw == 1 {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub fn as_raw(self) -> u8 {
        match self {
            Self::Up => 1,
            Self::Down => 0,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
        }
    }
}

/// A feature record paired with the known outcome of the following bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub features: FeatureRecord,
    pub label: Label,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_follows_schema_order() {
        let record = FeatureRecord {
            timestamp: 1,
            open: 1.0,
            high: 2.0,
            low: 3.0,
            close: 4.0,
            volume: 5.0,
            ma_10: 6.0,
            ma_50: 7.0,
            rsi_14: 8.0,
        };
        assert_eq!(record.to_row(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(FEATURE_SCHEMA.len(), record.to_row().len());
    }

    #[test]
    fn test_label_raw_convention() {
        assert_eq!(Label::from_raw(1), Label::Up);
        assert_eq!(Label::from_raw(0), Label::Down);
        assert_eq!(Label::Up.as_raw(), 1);
        assert_eq!(Label::Down.as_raw(), 0);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Up.to_string(), "Up");
        assert_eq!(Label::Down.to_string(), "Down");
    }
}
