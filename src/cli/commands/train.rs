//! Train command implementation.

use anyhow::{Context, Result};
use tracing::info;

use predict_data::CsvBarStore;
use predict_features::{IndicatorEngine, LabelingEngine};
use predict_model::{ForestConfig, TrainingPipeline};

use crate::cli::TrainArgs;
use std::path::Path;

pub async fn run(args: TrainArgs, config_path: &Path) -> Result<()> {
    let config = predict_config::load_config(config_path).context("Failed to load config")?;

    let split_ratio = args.split_ratio.unwrap_or(config.training.split_ratio);
    let seed = args.seed.unwrap_or(config.training.seed);

    let store = CsvBarStore::new(config.data.data_dir.clone());
    let bars = store
        .load(&args.symbol)
        .with_context(|| format!("Failed to load bars for {}", args.symbol))?;
    info!(symbol = %args.symbol, bars = bars.len(), "loaded bar history");

    let records = IndicatorEngine::new().compute(&bars)?;
    let examples = LabelingEngine::new().label(&records);
    info!(records = records.len(), examples = examples.len(), "features computed");

    let pipeline = TrainingPipeline::new(split_ratio, seed).with_forest_config(ForestConfig {
        n_trees: config.training.n_trees,
        max_depth: config.training.max_depth,
        min_samples_split: config.training.min_samples_split,
        seed,
    });
    let report = pipeline.train(&examples)?;

    let output = args.output.unwrap_or_else(|| {
        config
            .data
            .model_dir
            .join(format!("{}_model.json", args.symbol))
    });
    report.artifact.save(&output)?;

    info!(artifact = %report.artifact.id, path = %output.display(), "artifact saved");
    println!(
        "Trained on {} examples ({} train / {} test), accuracy {:.4}",
        examples.len(),
        report.train_size,
        report.test_size,
        report.accuracy
    );
    println!("Artifact {} saved to {}", report.artifact.id, output.display());

    Ok(())
}
