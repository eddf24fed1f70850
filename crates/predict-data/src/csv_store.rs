//! Flat-file bar store, one CSV per instrument.

use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use predict_core::error::DataError;
use predict_core::types::{validate_sequence, Bar};

/// CSV row format: `timestamp,open,high,low,close,volume`.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "Timestamp")]
    timestamp: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: f64,
}

/// Durable per-instrument bar storage backed by CSV files.
///
/// Loads validate the sequence before returning: duplicate or
/// out-of-order timestamps reject the whole file rather than feeding a
/// corrupted history downstream.
pub struct CsvBarStore {
    data_dir: PathBuf,
}

impl CsvBarStore {
    /// Create a store rooted at the given directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// File path for an instrument.
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}_prices.csv", symbol))
    }

    /// Load the full bar sequence for an instrument.
    pub fn load(&self, symbol: &str) -> Result<Vec<Bar>, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::NoDataAvailable);
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut bars = Vec::new();
        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            let timestamp = parse_timestamp(&record.timestamp)?;
            bars.push(Bar::new(
                timestamp,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable);
        }
        validate_sequence(&bars)?;

        debug!(symbol, bars = bars.len(), "loaded bar history");
        Ok(bars)
    }

    /// Persist a bar sequence, replacing any previous file.
    ///
    /// Writes to a temp file and renames, so readers never observe a
    /// half-written history.
    pub fn save(&self, symbol: &str, bars: &[Bar]) -> Result<(), DataError> {
        validate_sequence(bars)?;

        fs::create_dir_all(&self.data_dir).map_err(|e| DataError::ParseError(e.to_string()))?;

        let path = self.path_for(symbol);
        let tmp_path = path.with_extension("csv.tmp");

        {
            let mut writer = WriterBuilder::new()
                .has_headers(true)
                .from_path(&tmp_path)
                .map_err(|e| DataError::ParseError(e.to_string()))?;

            for bar in bars {
                let record = CsvRecord {
                    timestamp: bar.timestamp.to_string(),
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume,
                };
                writer
                    .serialize(record)
                    .map_err(|e| DataError::ParseError(e.to_string()))?;
            }
            writer
                .flush()
                .map_err(|e| DataError::ParseError(e.to_string()))?;
        }

        fs::rename(&tmp_path, &path).map_err(|e| DataError::ParseError(e.to_string()))?;
        debug!(symbol, bars = bars.len(), path = %path.display(), "saved bar history");
        Ok(())
    }

    /// Get the store's root directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Parse the timestamp formats exchanges and spreadsheets produce.
fn parse_timestamp(value: &str) -> Result<i64, DataError> {
    use chrono::{NaiveDate, NaiveDateTime};

    let formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(value, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    if let Ok(ts) = value.parse::<i64>() {
        // Assume milliseconds past 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        }
        return Ok(ts * 1000);
    }

    Err(DataError::ParseError(format!(
        "could not parse timestamp: {}",
        value
    )))
}
