//! ML model crate for render-performance optimization prediction.
//!
//! This crate fits a decision tree on standardized render metrics and
//! persists the fitted pipeline (model, scaler, label encoder) so the CLI
//! can reload it later for one-shot predictions.

mod artifacts;
mod labels;
mod metrics;
mod scaler;
mod training;

pub use artifacts::{predict_label, Artifacts};
pub use labels::LabelEncoder;
pub use metrics::{ClassMetrics, ClassificationReport};
pub use scaler::StandardScaler;
pub use training::{train, Evaluation, TrainingConfig, TrainingOutput};
