//! Categorical label encoding.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Maps categorical labels to dense class indices and back.
///
/// Classes are stored sorted, so the index assignment is stable for a given
/// label set regardless of input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fits the encoder on the labels seen in the training data.
    ///
    /// # Errors
    ///
    /// Returns an error if no labels are provided.
    pub fn fit<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();

        if classes.is_empty() {
            bail!("cannot fit label encoder on an empty label set");
        }

        Ok(Self {
            classes: classes.into_iter().collect(),
        })
    }

    /// The distinct classes, sorted.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Encodes a label to its class index.
    ///
    /// # Errors
    ///
    /// Returns an error for a label the encoder was not fitted on.
    pub fn transform(&self, label: &str) -> Result<usize> {
        match self.classes.binary_search_by(|class| class.as_str().cmp(label)) {
            Ok(index) => Ok(index),
            Err(_) => bail!(
                "unknown label `{label}`; known classes: {:?}",
                self.classes
            ),
        }
    }

    /// Decodes a class index back to its label.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    pub fn inverse_transform(&self, index: usize) -> Result<&str> {
        match self.classes.get(index) {
            Some(class) => Ok(class.as_str()),
            None => bail!(
                "class index {index} out of range for {} classes",
                self.classes.len()
            ),
        }
    }
}
