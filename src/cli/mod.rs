//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "predictor")]
#[command(author, version, about = "Crypto price movement prediction pipeline")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch bar history for the configured instruments
    Fetch(FetchArgs),
    /// Compute features, train a model, and save the artifact
    Train(TrainArgs),
    /// Predict from a live feature snapshot against a saved artifact
    Predict(PredictArgs),
    /// Serve predictions for a saved artifact over HTTP
    Serve(ServeArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct FetchArgs {
    /// Instruments to fetch (comma-separated, overrides config)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Bars to request per instrument (overrides config)
    #[arg(long)]
    pub lookback: Option<usize>,
}

#[derive(clap::Args)]
pub struct TrainArgs {
    /// Instrument to train on
    #[arg(short, long)]
    pub symbol: String,

    /// Train fraction of the split (overrides config)
    #[arg(long)]
    pub split_ratio: Option<f64>,

    /// Seed for the randomized split (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Artifact output path (defaults to <model_dir>/<symbol>_model.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Path to the model artifact
    #[arg(short, long)]
    pub artifact: PathBuf,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    pub bind: String,
}

#[derive(clap::Args)]
pub struct PredictArgs {
    /// Path to the model artifact
    #[arg(short, long)]
    pub artifact: PathBuf,

    /// Live feature snapshot as a JSON object of name -> value
    #[arg(short, long)]
    pub features: String,
}
