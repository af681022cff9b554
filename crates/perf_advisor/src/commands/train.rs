//! Train command - fits the classifier on a performance log file.

use std::path::Path;

use anyhow::Result;
use config::ArtifactPaths;
use feature_extractor::extract_training_samples;
use ml_model::{train, TrainingConfig};
use tracing::info;

/// Runs the train command.
///
/// # Errors
///
/// Returns an error if the log file cannot be read or training fails.
pub fn run(
    logs_path: &Path,
    model_dir: &Path,
    test_ratio: f32,
    seed: u64,
    max_depth: Option<usize>,
) -> Result<()> {
    info!(logs = %logs_path.display(), "Loading performance logs");

    let records = perf_logs::load_logs(logs_path)?;

    let labels = perf_logs::unique_labels(&records);
    info!(?labels, "Available optimizations");

    let samples = extract_training_samples(&records);
    info!(samples = samples.len(), "Extracted training samples");

    let config = TrainingConfig {
        test_ratio,
        seed,
        max_depth,
    };
    let output = train(&samples, &config)?;

    if let Some(evaluation) = &output.evaluation {
        info!(
            accuracy = evaluation.accuracy,
            n_train = output.n_train,
            n_test = output.n_test,
            "Model accuracy"
        );
        println!("{}", evaluation.report);
    }

    let paths = ArtifactPaths::in_dir(model_dir);
    output.artifacts.save(&paths)?;

    info!(
        model = %paths.model.display(),
        scaler = %paths.scaler.display(),
        label_encoder = %paths.label_encoder.display(),
        "Model trained and saved"
    );

    Ok(())
}
