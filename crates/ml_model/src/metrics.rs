//! Held-out evaluation metrics.

use std::fmt;

/// Precision, recall and F1 for a single class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of held-out samples whose true class this is.
    pub support: usize,
}

/// Per-class classification report over a held-out split.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total_support: usize,
}

impl ClassificationReport {
    /// Builds the report from parallel truth/prediction class indices.
    ///
    /// `labels` maps class indices to display names. Classes that appear in
    /// neither the truth nor the predictions are omitted.
    #[must_use]
    pub fn from_predictions(truth: &[usize], predicted: &[usize], labels: &[String]) -> Self {
        let total = truth.len();
        let matches = truth
            .iter()
            .zip(predicted)
            .filter(|(t, p)| t == p)
            .count();
        let accuracy = if total == 0 {
            0.0
        } else {
            matches as f64 / total as f64
        };

        let mut classes = Vec::new();
        for (class, label) in labels.iter().enumerate() {
            let support = truth.iter().filter(|&&t| t == class).count();
            let predicted_count = predicted.iter().filter(|&&p| p == class).count();
            if support == 0 && predicted_count == 0 {
                continue;
            }

            let true_positives = truth
                .iter()
                .zip(predicted)
                .filter(|(&t, &p)| t == class && p == class)
                .count();

            let precision = ratio(true_positives, predicted_count);
            let recall = ratio(true_positives, support);
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };

            classes.push(ClassMetrics {
                label: label.clone(),
                precision,
                recall,
                f1,
                support,
            });
        }

        Self {
            classes,
            accuracy,
            total_support: total,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>16} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for class in &self.classes {
            writeln!(
                f,
                "{:>16} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                class.label, class.precision, class.recall, class.f1, class.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>16} {:>29.2} {:>9}",
            "accuracy", self.accuracy, self.total_support
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["memoization".to_string(), "none".to_string()]
    }

    #[test]
    fn test_perfect_predictions() {
        let truth = [0, 0, 1, 1, 1];
        let report = ClassificationReport::from_predictions(&truth, &truth, &labels());

        assert!((report.accuracy - 1.0).abs() < f64::EPSILON);
        assert_eq!(report.total_support, 5);
        assert_eq!(report.classes.len(), 2);
        for class in &report.classes {
            assert!((class.precision - 1.0).abs() < f64::EPSILON);
            assert!((class.recall - 1.0).abs() < f64::EPSILON);
            assert!((class.f1 - 1.0).abs() < f64::EPSILON);
        }
        assert_eq!(report.classes[0].support, 2);
        assert_eq!(report.classes[1].support, 3);
    }

    #[test]
    fn test_mixed_predictions() {
        // Class 0: one of two recalled; one false positive from class 1.
        let truth = [0, 0, 1, 1];
        let predicted = [0, 1, 0, 1];
        let report = ClassificationReport::from_predictions(&truth, &predicted, &labels());

        assert!((report.accuracy - 0.5).abs() < f64::EPSILON);
        let class0 = &report.classes[0];
        assert!((class0.precision - 0.5).abs() < f64::EPSILON);
        assert!((class0.recall - 0.5).abs() < f64::EPSILON);
        assert!((class0.f1 - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unseen_class_is_omitted() {
        let labels = vec![
            "memoization".to_string(),
            "none".to_string(),
            "optimized".to_string(),
        ];
        let truth = [0, 1];
        let predicted = [0, 1];
        let report = ClassificationReport::from_predictions(&truth, &predicted, &labels);

        assert_eq!(report.classes.len(), 2);
        assert!(report.classes.iter().all(|c| c.label != "optimized"));
    }

    #[test]
    fn test_empty_split() {
        let report = ClassificationReport::from_predictions(&[], &[], &labels());
        assert!(report.accuracy.abs() < f64::EPSILON);
        assert_eq!(report.total_support, 0);
        assert!(report.classes.is_empty());
    }

    #[test]
    fn test_display_contains_class_rows() {
        let truth = [0, 1];
        let report = ClassificationReport::from_predictions(&truth, &truth, &labels());
        let rendered = report.to_string();

        assert!(rendered.contains("memoization"));
        assert!(rendered.contains("accuracy"));
        assert!(rendered.contains("support"));
    }
}
