//! Decision-tree training on extracted samples.

use anyhow::{bail, Context, Result};
use feature_extractor::{TrainingSample, FEATURE_COUNT, FEATURE_NAMES};
use linfa::prelude::*;
use linfa::Dataset;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::{Artifacts, ClassificationReport, LabelEncoder, StandardScaler};

/// Configuration for a training run.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Fraction of samples held out for evaluation.
    pub test_ratio: f32,
    /// Seed for the shuffle that precedes the split.
    pub seed: u64,
    /// Maximum tree depth, unlimited when `None`.
    pub max_depth: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            seed: 42,
            max_depth: None,
        }
    }
}

/// Metrics computed on the held-out split.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub accuracy: f32,
    pub report: ClassificationReport,
}

/// Result of a training run.
#[derive(Debug)]
pub struct TrainingOutput {
    /// The fitted pipeline, ready to persist.
    pub artifacts: Artifacts,
    /// Held-out metrics, absent when the split left no test samples.
    pub evaluation: Option<Evaluation>,
    pub n_train: usize,
    pub n_test: usize,
}

/// Trains the classifier pipeline on the given samples.
///
/// Encodes the labels, standardizes the features, shuffles with the
/// configured seed, splits off the held-out set and fits the tree. The run
/// is deterministic for a fixed seed and sample order.
///
/// # Errors
///
/// Returns an error if there are fewer than two samples, if the test ratio
/// is out of range, or if fitting fails.
pub fn train(samples: &[TrainingSample], config: &TrainingConfig) -> Result<TrainingOutput> {
    if samples.len() < 2 {
        bail!("need at least 2 training samples, got {}", samples.len());
    }
    if !(0.0..1.0).contains(&config.test_ratio) {
        bail!("test ratio must be in [0, 1), got {}", config.test_ratio);
    }

    let encoder = LabelEncoder::fit(samples.iter().map(|sample| sample.label.as_str()))?;

    let mut flat = Vec::with_capacity(samples.len() * FEATURE_COUNT);
    let mut targets = Vec::with_capacity(samples.len());
    for sample in samples {
        flat.extend_from_slice(&sample.features.values);
        targets.push(encoder.transform(&sample.label)?);
    }

    let records = Array2::from_shape_vec((samples.len(), FEATURE_COUNT), flat)
        .context("building feature table")?;

    let scaler = StandardScaler::fit(&records)?;
    let scaled = scaler.transform(&records)?;

    let dataset =
        Dataset::new(scaled, Array1::from_vec(targets)).with_feature_names(FEATURE_NAMES.to_vec());

    let mut rng = StdRng::seed_from_u64(config.seed);
    let (train_set, test_set) = dataset
        .shuffle(&mut rng)
        .split_with_ratio(1.0 - config.test_ratio);

    let n_train = train_set.targets.len();
    let n_test = test_set.targets.len();
    if n_train == 0 {
        bail!("no training samples left after the split");
    }

    let model = DecisionTree::params()
        .max_depth(config.max_depth)
        .fit(&train_set)
        .context("fitting decision tree")?;

    let evaluation = if n_test == 0 {
        warn!("held-out split is empty; skipping evaluation");
        None
    } else {
        let predicted = model.predict(&test_set);
        let confusion = predicted
            .confusion_matrix(&test_set)
            .context("building confusion matrix")?;

        let truth: Vec<usize> = test_set.targets.iter().copied().collect();
        let guesses: Vec<usize> = predicted.iter().copied().collect();
        let report = ClassificationReport::from_predictions(&truth, &guesses, encoder.classes());

        Some(Evaluation {
            accuracy: confusion.accuracy(),
            report,
        })
    };

    info!(
        n_train,
        n_test,
        classes = encoder.classes().len(),
        "Training complete"
    );

    Ok(TrainingOutput {
        artifacts: Artifacts {
            model,
            scaler,
            encoder,
        },
        evaluation,
        n_train,
        n_test,
    })
}

/// Two well-separated classes for tests: slow unoptimized renders and fast
/// memoized ones.
#[cfg(test)]
pub(crate) fn synthetic_samples(per_class: usize) -> Vec<TrainingSample> {
    use feature_extractor::RenderFeatures;

    let mut samples = Vec::new();
    for i in 0..per_class {
        let jitter = i as f64 * 0.1;
        samples.push(TrainingSample {
            features: RenderFeatures {
                values: [25.0 + jitter, 25.0 + jitter, 3.0, 5.0, 1.0],
            },
            label: "none".to_string(),
        });
        samples.push(TrainingSample {
            features: RenderFeatures {
                values: [0.2 + jitter / 100.0, 0.2, 1.0, 1.0, 1.0],
            },
            label: "memoization".to_string(),
        });
    }
    samples
}
