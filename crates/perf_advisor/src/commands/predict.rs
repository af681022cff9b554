//! Predict command - scores one feature vector with the trained artifacts.

use std::path::Path;

use anyhow::{Context, Result};
use config::ArtifactPaths;
use feature_extractor::RenderFeatures;
use ml_model::{predict_label, Artifacts};
use tracing::debug;

/// Runs the predict command.
///
/// Prints the predicted optimization label to stdout.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON, has the wrong shape,
/// or the artifacts are missing or unreadable.
pub fn run(raw_features: &str, model_dir: &Path) -> Result<()> {
    let label = predict_from_input(raw_features, model_dir)?;
    println!("{label}");
    Ok(())
}

/// Parses the CLI input and scores it against the persisted artifacts.
///
/// Input validation happens before the artifacts are touched, so a
/// malformed vector never reaches the model.
fn predict_from_input(raw_features: &str, model_dir: &Path) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(raw_features).context("input features are not valid JSON")?;
    let features = RenderFeatures::from_json(&value)?;
    debug!(?features, "Parsed input features");

    let paths = ArtifactPaths::in_dir(model_dir);
    let artifacts = Artifacts::load(&paths)?;

    predict_label(&artifacts, &features)
}
