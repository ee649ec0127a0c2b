//! Validation metrics reported after training.

use std::collections::BTreeSet;
use std::fmt;

use pulse_core::Category;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub category: Category,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Accuracy, per-class scores, and confusion matrix on the validation fold.
///
/// `confusion[i][j]` counts rows whose true class is `classes[i]` and whose
/// predicted class is `classes[j]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub classes: Vec<Category>,
    pub per_class: Vec<ClassMetrics>,
    pub confusion: Vec<Vec<usize>>,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Compare true and predicted labels pairwise.
///
/// Classes are the sorted union of both label sets. Undefined precision or
/// recall (zero denominator) is reported as `0.0`.
///
/// # Panics
///
/// Panics if `truth` and `predicted` differ in length.
#[must_use]
pub fn evaluate(truth: &[Category], predicted: &[Category]) -> EvaluationReport {
    assert_eq!(
        truth.len(),
        predicted.len(),
        "truth and predictions must be the same length"
    );

    let classes: Vec<Category> = truth
        .iter()
        .chain(predicted)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let index_of = |c: &Category| classes.binary_search(c).unwrap_or_default();

    let mut confusion = vec![vec![0_usize; classes.len()]; classes.len()];
    for (t, p) in truth.iter().zip(predicted) {
        confusion[index_of(t)][index_of(p)] += 1;
    }

    let correct: usize = (0..classes.len()).map(|i| confusion[i][i]).sum();
    let accuracy = ratio(correct, truth.len());

    let per_class = classes
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let tp = confusion[i][i];
            let support: usize = confusion[i].iter().sum();
            let predicted_as: usize = confusion.iter().map(|row| row[i]).sum();
            let precision = ratio(tp, predicted_as);
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassMetrics {
                category: category.clone(),
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    EvaluationReport {
        accuracy,
        classes,
        per_class,
        confusion,
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.as_str().chars().count())
            .max()
            .unwrap_or(0)
            .max("accuracy".len());

        writeln!(
            f,
            "{:>width$}  {:>9}  {:>9}  {:>9}  {:>7}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for m in &self.per_class {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>7}",
                m.category.as_str(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        let total: usize = self.per_class.iter().map(|m| m.support).sum();
        writeln!(
            f,
            "{:>width$}  {:>9}  {:>9}  {:>9.2}  {:>7}",
            "accuracy", "", "", self.accuracy, total
        )?;

        writeln!(f)?;
        writeln!(f, "confusion matrix (rows = true, columns = predicted):")?;
        for (category, row) in self.classes.iter().zip(&self.confusion) {
            let cells: Vec<String> = row.iter().map(|n| format!("{n:>5}")).collect();
            writeln!(f, "{:>width$}  {}", category.as_str(), cells.join(""))?;
        }
        Ok(())
    }
}
