//! Log record model and loading for React render-performance logs.
//!
//! The profiler callback on the frontend posts one JSON object per commit
//! and the collector appends them into a single JSON array on disk. This
//! crate parses that array into structured records for feature extraction.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One render-performance log entry, as written by the profiler callback.
///
/// Field names follow the React `Profiler` callback signature, hence
/// camelCase on the wire. Unknown keys are ignored so older log files stay
/// loadable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfRecord {
    /// Component id passed to the profiler.
    pub component: Option<String>,

    /// Render phase ("mount" or "update").
    pub phase: Option<String>,

    /// Time spent rendering the committed update, in milliseconds.
    pub actual_duration: f64,

    /// Estimated render time without memoization.
    pub base_duration: Option<f64>,

    /// When the render started.
    pub start_time: Option<f64>,

    /// When the update was committed.
    pub commit_time: Option<f64>,

    /// Render time metric used for training.
    pub render_time: f64,

    /// Number of state updates that triggered this render.
    pub state_updates: f64,

    /// Number of props the component received.
    pub props_received: f64,

    /// Number of received props the component actually used.
    /// Older log entries may lack this field.
    pub props_used: Option<f64>,

    /// Optimization technique in effect when the sample was logged.
    pub optimization_applied: String,
}

/// Loads performance log records from a JSON array file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not contain a JSON
/// array of log records.
pub fn load_logs(path: &Path) -> Result<Vec<PerfRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading log file {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("parsing log file {} as a JSON record array", path.display()))
}

/// Distinct optimization labels, in first-seen order.
#[must_use]
pub fn unique_labels(records: &[PerfRecord]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for record in records {
        if !labels.contains(&record.optimization_applied) {
            labels.push(record.optimization_applied.clone());
        }
    }
    labels
}

/// Distinct component names, in first-seen order.
///
/// Records without a component id are skipped.
#[must_use]
pub fn unique_components(records: &[PerfRecord]) -> Vec<String> {
    let mut components: Vec<String> = Vec::new();
    for record in records {
        let Some(component) = &record.component else {
            continue;
        };
        if !components.contains(component) {
            components.push(component.clone());
        }
    }
    components
}

/// The most recent log entry for the named component.
///
/// The log file is append-only, so the last matching record is the latest.
#[must_use]
pub fn latest_for_component<'a>(
    records: &'a [PerfRecord],
    component: &str,
) -> Option<&'a PerfRecord> {
    records
        .iter()
        .rev()
        .find(|record| record.component.as_deref() == Some(component))
}
