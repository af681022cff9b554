//! Persistence of the trained pipeline and the single-vector predict path.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{bail, Context, Result};
use config::ArtifactPaths;
use feature_extractor::{RenderFeatures, FEATURE_COUNT};
use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::Array2;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{LabelEncoder, StandardScaler};

/// The three fitted objects produced by training.
#[derive(Debug)]
pub struct Artifacts {
    pub model: DecisionTree<f64, usize>,
    pub scaler: StandardScaler,
    pub encoder: LabelEncoder,
}

impl Artifacts {
    /// Writes all three artifacts, creating the target directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or any artifact
    /// fails to serialize.
    pub fn save(&self, paths: &ArtifactPaths) -> Result<()> {
        if let Some(dir) = paths.model.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating artifact directory {}", dir.display()))?;
        }

        write_artifact(&paths.model, &self.model)?;
        write_artifact(&paths.scaler, &self.scaler)?;
        write_artifact(&paths.label_encoder, &self.encoder)?;
        Ok(())
    }

    /// Loads all three artifacts from disk.
    ///
    /// # Errors
    ///
    /// Reports every missing file up front, with a hint to run training,
    /// before attempting to deserialize anything.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let missing = paths.missing();
        if !missing.is_empty() {
            let listed: Vec<String> = missing
                .iter()
                .map(|path| path.display().to_string())
                .collect();
            bail!(
                "missing artifact file(s): {}; run `perf-advisor train` to generate them",
                listed.join(", ")
            );
        }

        Ok(Self {
            model: read_artifact(&paths.model)?,
            scaler: read_artifact(&paths.scaler)?,
            encoder: read_artifact(&paths.label_encoder)?,
        })
    }
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    bincode::serialize_into(BufWriter::new(file), value)
        .with_context(|| format!("serializing {}", path.display()))
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    bincode::deserialize_from(BufReader::new(file))
        .with_context(|| format!("deserializing {}", path.display()))
}

/// Predicts the optimization label for a single feature vector.
///
/// # Errors
///
/// Returns an error if the vector width does not match the fitted scaler,
/// or if the predicted class index cannot be decoded.
pub fn predict_label(artifacts: &Artifacts, features: &RenderFeatures) -> Result<String> {
    let row = Array2::from_shape_vec((1, FEATURE_COUNT), features.values.to_vec())
        .context("building input row")?;
    let scaled = artifacts.scaler.transform(&row)?;

    let predicted = artifacts.model.predict(&scaled);
    let Some(&class) = predicted.first() else {
        bail!("model returned no prediction");
    };

    Ok(artifacts.encoder.inverse_transform(class)?.to_string())
}
