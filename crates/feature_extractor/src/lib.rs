//! Feature extraction for the render-performance classifier.
//!
//! This crate transforms raw log records (or CLI-supplied JSON) into the
//! fixed feature vector the model trains and predicts on.

use anyhow::{bail, Context, Result};
use perf_logs::PerfRecord;
use serde_json::Value;

/// The number of features in the model input.
pub const FEATURE_COUNT: usize = 5;

/// Feature names, in the column order the model is trained with.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "actualDuration",
    "renderTime",
    "stateUpdates",
    "propsReceived",
    "propsUsed",
];

/// Placeholder for metrics absent from a record or input object.
pub const MISSING_FEATURE_VALUE: f64 = -1.0;

/// Renders that commit within this many milliseconds count as already
/// optimized, whatever technique the log claims.
pub const FAST_RENDER_THRESHOLD: f64 = 0.05;

/// Label assigned to fast renders during training.
pub const OPTIMIZED_LABEL: &str = "optimized";

/// Feature vector for a single render event, in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFeatures {
    pub values: [f64; FEATURE_COUNT],
}

impl RenderFeatures {
    /// Extracts the feature vector from a log record.
    ///
    /// A record without `propsUsed` gets the missing-value placeholder,
    /// matching what the prediction input path does for absent keys.
    #[must_use]
    pub fn from_record(record: &PerfRecord) -> Self {
        Self {
            values: [
                record.actual_duration,
                record.render_time,
                record.state_updates,
                record.props_received,
                record.props_used.unwrap_or(MISSING_FEATURE_VALUE),
            ],
        }
    }

    /// Parses the feature vector from CLI-supplied JSON.
    ///
    /// Accepts either an array of five numbers in canonical order, or an
    /// object keyed by feature name where missing keys fall back to the
    /// missing-value placeholder.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither an array nor an object, if
    /// an array has the wrong length, or if any feature is not a number.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                if items.len() != FEATURE_COUNT {
                    bail!(
                        "input feature length mismatch: expected {FEATURE_COUNT} values, got {}",
                        items.len()
                    );
                }

                let mut values = [0.0; FEATURE_COUNT];
                for (i, item) in items.iter().enumerate() {
                    values[i] = item.as_f64().with_context(|| {
                        format!("feature `{}` is not a number: {item}", FEATURE_NAMES[i])
                    })?;
                }
                Ok(Self { values })
            }
            Value::Object(map) => {
                let mut values = [MISSING_FEATURE_VALUE; FEATURE_COUNT];
                for (i, name) in FEATURE_NAMES.iter().enumerate() {
                    if let Some(item) = map.get(*name) {
                        values[i] = item
                            .as_f64()
                            .with_context(|| format!("feature `{name}` is not a number: {item}"))?;
                    }
                }
                Ok(Self { values })
            }
            other => bail!("expected a JSON array or object of features, got: {other}"),
        }
    }
}

/// The label a record trains with, after the fast-render adjustment.
///
/// Commits completing within [`FAST_RENDER_THRESHOLD`] are labeled
/// [`OPTIMIZED_LABEL`] regardless of the logged technique.
#[must_use]
pub fn adjusted_label(record: &PerfRecord) -> &str {
    if (0.0..=FAST_RENDER_THRESHOLD).contains(&record.actual_duration) {
        OPTIMIZED_LABEL
    } else {
        &record.optimization_applied
    }
}

/// Training sample pairing a feature vector with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSample {
    pub features: RenderFeatures,
    pub label: String,
}

/// Builds training samples from raw log records.
#[must_use]
pub fn extract_training_samples(records: &[PerfRecord]) -> Vec<TrainingSample> {
    records
        .iter()
        .map(|record| TrainingSample {
            features: RenderFeatures::from_record(record),
            label: adjusted_label(record).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(actual_duration: f64, label: &str) -> PerfRecord {
        let raw = json!({
            "component": "TestComponent",
            "actualDuration": actual_duration,
            "renderTime": 12.0,
            "stateUpdates": 2,
            "propsReceived": 3,
            "propsUsed": 1,
            "optimizationApplied": label,
        });
        serde_json::from_value(raw).expect("record should deserialize")
    }

    #[test]
    fn test_from_record_canonical_order() {
        let features = RenderFeatures::from_record(&record(7.5, "none"));
        assert_eq!(features.values, [7.5, 12.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_from_record_fills_missing_props_used() {
        let mut r = record(7.5, "none");
        r.props_used = None;
        let features = RenderFeatures::from_record(&r);
        assert_eq!(features.values[4], MISSING_FEATURE_VALUE);
    }

    #[test]
    fn test_from_json_array() {
        let value = json!([0.1, 2.0, 3.0, 4.0, 5.0]);
        let features = RenderFeatures::from_json(&value).expect("array input");
        assert_eq!(features.values, [0.1, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_from_json_array_length_mismatch() {
        let value = json!([1.0, 2.0, 3.0]);
        let err = RenderFeatures::from_json(&value).expect_err("short array");
        assert!(err.to_string().contains("length mismatch"));
    }

    #[test]
    fn test_from_json_array_rejects_non_number() {
        let value = json!([1.0, "fast", 3.0, 4.0, 5.0]);
        assert!(RenderFeatures::from_json(&value).is_err());
    }

    #[test]
    fn test_from_json_object_fills_missing_keys() {
        let value = json!({
            "actualDuration": 1.5,
            "renderTime": 1.5,
            "stateUpdates": 4,
            "propsReceived": 2
        });
        let features = RenderFeatures::from_json(&value).expect("object input");
        assert_eq!(features.values, [1.5, 1.5, 4.0, 2.0, MISSING_FEATURE_VALUE]);
    }

    #[test]
    fn test_from_json_rejects_scalar() {
        assert!(RenderFeatures::from_json(&json!(42)).is_err());
    }

    #[test]
    fn test_adjusted_label_fast_render() {
        assert_eq!(adjusted_label(&record(0.0, "none")), OPTIMIZED_LABEL);
        assert_eq!(adjusted_label(&record(0.05, "none")), OPTIMIZED_LABEL);
        assert_eq!(adjusted_label(&record(0.051, "none")), "none");
        // Negative durations are malformed profiler output; leave them as logged.
        assert_eq!(adjusted_label(&record(-1.0, "none")), "none");
    }

    #[test]
    fn test_extract_training_samples() {
        let records = vec![record(0.01, "none"), record(25.0, "memoization")];
        let samples = extract_training_samples(&records);

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].label, OPTIMIZED_LABEL);
        assert_eq!(samples[1].label, "memoization");
        assert_eq!(samples[1].features.values[0], 25.0);
    }
}
