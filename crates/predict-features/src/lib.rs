//! Feature engineering for the prediction pipeline.
//!
//! Two pure, stateless engines: [`IndicatorEngine`] turns an ordered bar
//! sequence into indicator-augmented feature records, and
//! [`LabelingEngine`] pairs each record with the direction of the next
//! bar's close without ever looking forward on the feature side.

mod engine;
mod indicators;
mod labeling;

pub use engine::{IndicatorEngine, MA_LONG_PERIOD, MA_SHORT_PERIOD, RSI_PERIOD, WARMUP_BARS};
pub use indicators::{Rsi, Sma};
pub use labeling::LabelingEngine;
