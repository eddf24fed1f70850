//! Config validation command.

use anyhow::{Context, Result};
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = predict_config::load_config(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    println!("Configuration OK");
    println!("  instruments: {}", config.ingest.symbols.join(", "));
    println!("  data dir:    {}", config.data.data_dir.display());
    println!("  model dir:   {}", config.data.model_dir.display());
    println!(
        "  training:    split {:.2}, seed {}, {} trees",
        config.training.split_ratio, config.training.seed, config.training.n_trees
    );
    Ok(())
}
