//! Analyze command - suggests an optimization for a logged component.

use std::path::Path;

use anyhow::{bail, Result};
use config::ArtifactPaths;
use feature_extractor::RenderFeatures;
use ml_model::{predict_label, Artifacts};
use tracing::info;

/// Runs the analyze command.
///
/// Looks up the latest log entry for the component and scores it.
///
/// # Errors
///
/// Returns an error if the logs cannot be read, the component has no log
/// entries, or the artifacts cannot be loaded.
pub fn run(component: &str, logs_path: &Path, model_dir: &Path) -> Result<()> {
    let records = perf_logs::load_logs(logs_path)?;

    let Some(record) = perf_logs::latest_for_component(&records, component) else {
        let known = perf_logs::unique_components(&records);
        bail!("no log entries for component `{component}`; logged components: {known:?}");
    };

    let features = RenderFeatures::from_record(record);
    info!(component, ?features, "Scoring latest log entry");

    let paths = ArtifactPaths::in_dir(model_dir);
    let artifacts = Artifacts::load(&paths)?;
    let label = predict_label(&artifacts, &features)?;

    println!("{component}: apply {label}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unknown_component_lists_logged_ones() {
        let dir = tempfile::tempdir().expect("tempdir");
        let logs_path = dir.path().join("performance_logs.json");
        let records = json!([{
            "component": "SlowComponent",
            "actualDuration": 20.0,
            "renderTime": 20.0,
            "stateUpdates": 1,
            "propsReceived": 1,
            "propsUsed": 1,
            "optimizationApplied": "none",
        }]);
        std::fs::write(&logs_path, records.to_string()).expect("write logs");

        let err = run("Nope", &logs_path, dir.path()).expect_err("unknown component");
        let message = err.to_string();
        assert!(message.contains("Nope"));
        assert!(message.contains("SlowComponent"));
    }

    #[test]
    fn test_missing_log_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = run("SlowComponent", &dir.path().join("absent.json"), dir.path());
        assert!(result.is_err());
    }
}
