//! Feature standardization.

use anyhow::{bail, Result};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Scales features to zero mean and unit variance.
///
/// The fitted means and standard deviations are stored so the exact same
/// transform can be replayed at prediction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fits the scaler on a feature table, one row per sample.
    ///
    /// Standard deviations are population deviations (ddof = 0). Columns
    /// with zero variance are scaled by 1 so constant features pass through
    /// centered instead of dividing by zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has no rows.
    pub fn fit(records: &Array2<f64>) -> Result<Self> {
        let Some(means) = records.mean_axis(Axis(0)) else {
            bail!("cannot fit scaler on an empty feature table");
        };

        let stds = records
            .std_axis(Axis(0), 0.0)
            .iter()
            .map(|&std| if std == 0.0 { 1.0 } else { std })
            .collect();

        Ok(Self {
            means: means.to_vec(),
            stds,
        })
    }

    /// Number of feature columns the scaler was fitted with.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Applies the fitted transform to a feature table.
    ///
    /// # Errors
    ///
    /// Returns an error if the column count differs from the fitted table.
    pub fn transform(&self, records: &Array2<f64>) -> Result<Array2<f64>> {
        if records.ncols() != self.means.len() {
            bail!(
                "feature count mismatch: scaler was fitted with {} features, got {}",
                self.means.len(),
                records.ncols()
            );
        }

        let mut scaled = records.clone();
        for (column_idx, mut column) in scaled.axis_iter_mut(Axis(1)).enumerate() {
            let mean = self.means[column_idx];
            let std = self.stds[column_idx];
            column.mapv_inplace(|value| (value - mean) / std);
        }

        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn test_fit_transform_centers_and_scales() {
        let records = array![[1.0, 10.0], [3.0, 10.0], [5.0, 10.0]];
        let scaler = StandardScaler::fit(&records).expect("fit");

        let scaled = scaler.transform(&records).expect("transform");

        // First column: mean 3, population std sqrt(8/3).
        let expected = (1.0f64 - 3.0) / (8.0f64 / 3.0).sqrt();
        assert!((scaled[[0, 0]] - expected).abs() < 1e-12);
        assert!(scaled[[1, 0]].abs() < 1e-12);

        // Zero-variance column is centered but not rescaled.
        assert!(scaled[[0, 1]].abs() < 1e-12);
        assert!(scaled[[2, 1]].abs() < 1e-12);
    }

    #[test]
    fn test_transform_is_column_count_checked() {
        let records = array![[1.0, 2.0], [3.0, 4.0]];
        let scaler = StandardScaler::fit(&records).expect("fit");

        let wrong_width = array![[1.0, 2.0, 3.0]];
        assert!(scaler.transform(&wrong_width).is_err());
    }

    #[test]
    fn test_fit_rejects_empty_table() {
        let records = Array2::<f64>::zeros((0, 5));
        assert!(StandardScaler::fit(&records).is_err());
    }

    #[test]
    fn test_n_features() {
        let records = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let scaler = StandardScaler::fit(&records).expect("fit");
        assert_eq!(scaler.n_features(), 3);
    }
}
