//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub ingest: IngestSettings,
    #[serde(default)]
    pub training: TrainingSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "predictor".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Local storage locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    /// Directory holding per-instrument bar CSVs
    pub data_dir: PathBuf,
    /// Directory holding model artifacts
    pub model_dir: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            model_dir: PathBuf::from("models"),
        }
    }
}

/// Ingestion settings: instruments to track and the retry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSettings {
    pub symbols: Vec<String>,
    /// Kline interval, e.g. "1d"
    pub interval: String,
    /// Bars to request per instrument
    pub lookback: usize,
    /// Hard attempt ceiling for transient failures
    pub max_attempts: u32,
    /// Fixed delay between retries, in seconds
    pub retry_delay_secs: u64,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
            interval: "1d".to_string(),
            lookback: 100,
            max_attempts: 3,
            retry_delay_secs: 5,
        }
    }
}

/// Training settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSettings {
    /// Fraction of examples used for training
    pub split_ratio: f64,
    /// Seed for the randomized split and the forest
    pub seed: u64,
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            split_ratio: 0.8,
            seed: 42,
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.ingest.max_attempts, 3);
        assert!(config.training.split_ratio > 0.0 && config.training.split_ratio < 1.0);
        assert!(!config.ingest.symbols.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [ingest]
            symbols = ["SOLUSDT"]
            interval = "4h"
            lookback = 500
            max_attempts = 5
            retry_delay_secs = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.ingest.symbols, vec!["SOLUSDT"]);
        assert_eq!(config.ingest.lookback, 500);
        // Untouched sections keep their defaults.
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.logging.level, "info");
    }
}
