//! Bar storage and exchange ingestion.

mod binance;
mod csv_store;

pub use binance::{BinanceClient, RetryPolicy};
pub use csv_store::CsvBarStore;
