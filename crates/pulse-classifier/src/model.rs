//! One-vs-rest logistic regression over sparse TF-IDF rows.

use std::collections::BTreeSet;

use pulse_core::Category;
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;
use crate::vectorizer::SparseVector;

/// Optimizer settings for [`OneVsRestLogistic::fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    /// Upper bound on gradient-descent iterations per class.
    pub max_iter: usize,
    /// Inverse L2 regularization strength.
    pub c: f64,
    pub learning_rate: f64,
    /// Stop once the largest parameter update falls below this.
    pub tol: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            max_iter: 2000,
            c: 1.0,
            learning_rate: 1.0,
            tol: 1e-6,
        }
    }
}

/// Per-class optimizer outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitSummary {
    pub iterations: Vec<usize>,
    pub converged: bool,
}

/// Binary logistic regressions, one per category, trained one-vs-rest.
///
/// Classes are kept sorted; prediction returns the class with the highest
/// decision value, and ties go to the earlier (lexicographically smaller)
/// class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneVsRestLogistic {
    classes: Vec<Category>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
    n_features: usize,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `None` if `row` indexes past `weights`.
fn dot(weights: &[f64], row: &SparseVector) -> Option<f64> {
    row.iter()
        .map(|&(idx, v)| weights.get(idx).map(|w| w * v))
        .sum()
}

impl OneVsRestLogistic {
    /// Fit one binary classifier per distinct label in `y`.
    ///
    /// Each minimizes mean log-loss plus `||w||^2 / (2 * c * n)` by
    /// full-batch gradient descent. The intercept is not regularized.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::InsufficientData`] if `x` and `y` differ in
    /// length or fewer than two classes are present, and
    /// [`ClassifierError::DimensionMismatch`] if a row indexes past
    /// `n_features`.
    pub fn fit(
        x: &[SparseVector],
        y: &[Category],
        n_features: usize,
        params: &FitParams,
    ) -> Result<(Self, FitSummary), ClassifierError> {
        if x.len() != y.len() {
            return Err(ClassifierError::InsufficientData(format!(
                "{} rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        for row in x {
            if let Some(&(idx, _)) = row.last() {
                if idx >= n_features {
                    return Err(ClassifierError::DimensionMismatch {
                        expected: n_features,
                        got: idx + 1,
                    });
                }
            }
        }

        let classes: Vec<Category> = y.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        if classes.len() < 2 {
            return Err(ClassifierError::InsufficientData(format!(
                "need at least two categories, found {}",
                classes.len()
            )));
        }

        let mut weights = Vec::with_capacity(classes.len());
        let mut intercepts = Vec::with_capacity(classes.len());
        let mut iterations = Vec::with_capacity(classes.len());
        let mut converged = true;

        for class in &classes {
            let targets: Vec<f64> = y
                .iter()
                .map(|label| if label == class { 1.0 } else { 0.0 })
                .collect();
            let (w, b, iters, done) = fit_binary(x, &targets, n_features, params);
            if !done {
                tracing::warn!(
                    category = %class,
                    max_iter = params.max_iter,
                    "logistic regression did not converge"
                );
            }
            converged &= done;
            weights.push(w);
            intercepts.push(b);
            iterations.push(iters);
        }

        Ok((
            Self {
                classes,
                weights,
                intercepts,
                n_features,
            },
            FitSummary {
                iterations,
                converged,
            },
        ))
    }

    #[must_use]
    pub fn classes(&self) -> &[Category] {
        &self.classes
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Check that the per-class tables agree with each other and with
    /// [`Self::n_features`]. A deserialized model must pass before use.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::CorruptArtifact`] naming the first
    /// inconsistency found.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(ClassifierError::CorruptArtifact(format!(
                "model has {n_classes} classes, need at least two"
            )));
        }
        if self.weights.len() != n_classes || self.intercepts.len() != n_classes {
            return Err(ClassifierError::CorruptArtifact(format!(
                "{n_classes} classes but {} weight rows and {} intercepts",
                self.weights.len(),
                self.intercepts.len()
            )));
        }
        if let Some((class, w)) = self
            .classes
            .iter()
            .zip(&self.weights)
            .find(|(_, w)| w.len() != self.n_features)
        {
            return Err(ClassifierError::CorruptArtifact(format!(
                "weight row for '{class}' has {} entries, expected {}",
                w.len(),
                self.n_features
            )));
        }
        Ok(())
    }

    /// Per-class decision values `w·x + b`, in [`Self::classes`] order.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::DimensionMismatch`] if `row` indexes past
    /// the model's feature count.
    pub fn decision_function(&self, row: &SparseVector) -> Result<Vec<f64>, ClassifierError> {
        if let Some(&(idx, _)) = row.last() {
            if idx >= self.n_features {
                return Err(ClassifierError::DimensionMismatch {
                    expected: self.n_features,
                    got: idx + 1,
                });
            }
        }
        self.weights
            .iter()
            .zip(&self.intercepts)
            .map(|(w, b)| {
                dot(w, row)
                    .map(|d| d + b)
                    .ok_or(ClassifierError::DimensionMismatch {
                        expected: w.len(),
                        got: row.last().map_or(0, |&(idx, _)| idx + 1),
                    })
            })
            .collect()
    }

    /// The single best category for `row`.
    ///
    /// # Errors
    ///
    /// See [`Self::decision_function`]. Also fails with
    /// [`ClassifierError::CorruptArtifact`] if the score count does not match
    /// the class count.
    pub fn predict(&self, row: &SparseVector) -> Result<&Category, ClassifierError> {
        let scores = self.decision_function(row)?;
        if scores.len() != self.classes.len() {
            return Err(ClassifierError::CorruptArtifact(format!(
                "{} scores for {} classes",
                scores.len(),
                self.classes.len()
            )));
        }
        let mut best: Option<(usize, f64)> = None;
        for (idx, &score) in scores.iter().enumerate() {
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((idx, score));
            }
        }
        best.and_then(|(idx, _)| self.classes.get(idx))
            .ok_or_else(|| ClassifierError::CorruptArtifact("model has no classes".to_string()))
    }
}

/// Returns `(weights, intercept, iterations, converged)`.
fn fit_binary(
    x: &[SparseVector],
    targets: &[f64],
    n_features: usize,
    params: &FitParams,
) -> (Vec<f64>, f64, usize, bool) {
    let mut w = vec![0.0_f64; n_features];
    let mut b = 0.0_f64;
    if x.is_empty() {
        return (w, b, 0, true);
    }

    #[allow(clippy::cast_precision_loss)]
    let n = x.len() as f64;
    let lambda = 1.0 / (params.c * n);
    let mut grad = vec![0.0_f64; n_features];

    for iter in 1..=params.max_iter {
        grad.iter_mut().for_each(|g| *g = 0.0);
        let mut grad_b = 0.0;

        for (row, &target) in x.iter().zip(targets) {
            // Rows were checked against n_features in `fit`.
            let err = sigmoid(dot(&w, row).unwrap_or(0.0) + b) - target;
            for &(idx, v) in row {
                grad[idx] += err * v;
            }
            grad_b += err;
        }

        let mut max_step = 0.0_f64;
        for (wj, gj) in w.iter_mut().zip(&grad) {
            let step = params.learning_rate * (gj / n + lambda * *wj);
            *wj -= step;
            max_step = max_step.max(step.abs());
        }
        let step_b = params.learning_rate * grad_b / n;
        b -= step_b;
        max_step = max_step.max(step_b.abs());

        if max_step < params.tol {
            return (w, b, iter, true);
        }
    }

    (w, b, params.max_iter, false)
}
