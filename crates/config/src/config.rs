use std::path::{Path, PathBuf};

/// Default directory for trained artifacts.
const DEFAULT_MODEL_DIR: &str = "models";

/// Default path to the performance log file written by the profiler backend.
const DEFAULT_LOGS_PATH: &str = "performance_logs.json";

/// File name of the persisted decision tree model.
pub const MODEL_FILE: &str = "react_perf_model.bin";

/// File name of the persisted feature scaler.
pub const SCALER_FILE: &str = "scaler.bin";

/// File name of the persisted label encoder.
pub const LABEL_ENCODER_FILE: &str = "label_encoder.bin";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the trained artifacts.
    pub model_dir: PathBuf,

    /// Path to the JSON performance log file.
    pub logs_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// A `.env` file is honored when present.
    ///
    /// Optional environment variables:
    /// - `PERF_ADVISOR_MODEL_DIR`: directory for trained artifacts (default: `models`)
    /// - `PERF_ADVISOR_LOGS`: path to the performance log file (default: `performance_logs.json`)
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let model_dir = std::env::var("PERF_ADVISOR_MODEL_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_MODEL_DIR), PathBuf::from);

        let logs_path = std::env::var("PERF_ADVISOR_LOGS")
            .map_or_else(|_| PathBuf::from(DEFAULT_LOGS_PATH), PathBuf::from);

        Self {
            model_dir,
            logs_path,
        }
    }
}

/// Paths of the three artifacts produced by a training run.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub label_encoder: PathBuf,
}

impl ArtifactPaths {
    /// Resolves the artifact paths inside the given directory.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(MODEL_FILE),
            scaler: dir.join(SCALER_FILE),
            label_encoder: dir.join(LABEL_ENCODER_FILE),
        }
    }

    /// Iterates over all three artifact paths.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [
            self.model.as_path(),
            self.scaler.as_path(),
            self.label_encoder.as_path(),
        ]
        .into_iter()
    }

    /// Returns the artifact paths that do not exist on disk.
    #[must_use]
    pub fn missing(&self) -> Vec<&Path> {
        self.iter().filter(|path| !path.exists()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths_in_dir() {
        let paths = ArtifactPaths::in_dir(Path::new("models"));
        assert_eq!(paths.model, Path::new("models/react_perf_model.bin"));
        assert_eq!(paths.scaler, Path::new("models/scaler.bin"));
        assert_eq!(paths.label_encoder, Path::new("models/label_encoder.bin"));
    }

    #[test]
    fn test_missing_reports_absent_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = ArtifactPaths::in_dir(dir.path());

        assert_eq!(paths.missing().len(), 3);

        std::fs::write(&paths.scaler, b"stub").expect("write scaler");
        let missing = paths.missing();
        assert_eq!(missing.len(), 2);
        assert!(missing.contains(&paths.model.as_path()));
        assert!(missing.contains(&paths.label_encoder.as_path()));
    }
}
