//! Core trait definitions.

mod bar_source;
mod classifier;

pub use bar_source::BarSource;
pub use classifier::Classifier;
