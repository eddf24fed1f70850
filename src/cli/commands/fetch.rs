//! Fetch command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

use predict_core::traits::BarSource;
use predict_data::{BinanceClient, CsvBarStore, RetryPolicy};

use crate::cli::FetchArgs;

pub async fn run(args: FetchArgs, config_path: &Path) -> Result<()> {
    let config = predict_config::load_config(config_path).context("Failed to load config")?;

    let symbols = if args.symbols.is_empty() {
        config.ingest.symbols.clone()
    } else {
        args.symbols
    };
    let lookback = args.lookback.unwrap_or(config.ingest.lookback);

    let client = BinanceClient::new(
        config.ingest.interval.clone(),
        RetryPolicy {
            max_attempts: config.ingest.max_attempts,
            delay: Duration::from_secs(config.ingest.retry_delay_secs),
        },
    );
    let store = CsvBarStore::new(config.data.data_dir.clone());

    let mut fetched = 0usize;
    for symbol in &symbols {
        info!(symbol = %symbol, lookback, "fetching bar history");
        match client.fetch_bars(symbol, lookback).await {
            Ok(bars) => {
                store.save(symbol, &bars)?;
                info!(symbol = %symbol, bars = bars.len(), "saved bar history");
                fetched += 1;
            }
            // Exhausted retries are fatal for the instrument: skip it
            // rather than persist a fabricated or partial history.
            Err(e) => error!(symbol = %symbol, error = %e, "skipping instrument"),
        }
    }

    if fetched == 0 {
        anyhow::bail!("no instrument could be fetched");
    }
    info!(fetched, total = symbols.len(), "fetch complete");
    Ok(())
}
