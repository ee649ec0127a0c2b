//! Offline training pipeline.

use std::collections::BTreeMap;

use pulse_core::{AppConfig, Category, TaxonomyFile};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::artifacts::{corpus_digest, ModelArtifacts};
use crate::balance::{balance_classes, class_counts};
use crate::corpus::LabeledExample;
use crate::error::ClassifierError;
use crate::metrics::{evaluate, EvaluationReport};
use crate::model::{FitParams, OneVsRestLogistic};
use crate::split::stratified_split;
use crate::vectorizer::{SparseVector, TfidfVectorizer};

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub max_features: usize,
    pub test_size: f64,
    pub seed: u64,
    pub fit: FitParams,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            test_size: 0.3,
            seed: 42,
            fit: FitParams::default(),
        }
    }
}

impl TrainingConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_features: config.max_features,
            test_size: config.test_size,
            seed: config.seed,
            fit: FitParams {
                max_iter: config.max_iter,
                ..FitParams::default()
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub artifacts: ModelArtifacts,
    pub report: EvaluationReport,
    /// Per-category counts after balancing (all equal).
    pub balanced_counts: BTreeMap<Category, usize>,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub converged: bool,
}

/// Reject examples whose category is not in `taxonomy`.
///
/// # Errors
///
/// Returns [`ClassifierError::UnknownCategory`] for the first offending label.
pub fn check_taxonomy(
    examples: &[LabeledExample],
    taxonomy: &TaxonomyFile,
) -> Result<(), ClassifierError> {
    match examples
        .iter()
        .find(|e| !taxonomy.contains(e.category.as_str()))
    {
        Some(e) => Err(ClassifierError::UnknownCategory(e.category.to_string())),
        None => Ok(()),
    }
}

fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}

/// Train a topic classifier from a labeled corpus.
///
/// Balances categories by upsampling, fits the vectorizer on the balanced
/// corpus, holds out a stratified validation fold, and fits the model on
/// the remaining training fold only. The validation fold is used solely for
/// the returned report.
///
/// # Errors
///
/// Returns [`ClassifierError`] for an empty corpus, a vocabulary that
/// tokenizes to nothing, fewer than two categories, or a validation fold
/// that cannot be formed.
pub fn train(
    examples: &[LabeledExample],
    config: &TrainingConfig,
) -> Result<TrainingOutcome, ClassifierError> {
    if examples.is_empty() {
        return Err(ClassifierError::EmptyCorpus);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);

    tracing::info!(counts = ?class_counts(examples), "class counts before balancing");
    let balanced = balance_classes(examples, &mut rng);
    let balanced_counts = class_counts(&balanced);
    tracing::info!(counts = ?balanced_counts, "class counts after balancing");

    let texts: Vec<&str> = balanced.iter().map(|e| e.text.as_str()).collect();
    let labels: Vec<Category> = balanced.iter().map(|e| e.category.clone()).collect();

    let mut vectorizer = TfidfVectorizer::new(config.max_features);
    let rows: Vec<SparseVector> = vectorizer.fit_transform(&texts)?;

    let split = stratified_split(&labels, config.test_size, &mut rng)?;
    let train_x = select(&rows, &split.train);
    let train_y = select(&labels, &split.train);
    let test_x = select(&rows, &split.test);
    let test_y = select(&labels, &split.test);

    let (model, summary) =
        OneVsRestLogistic::fit(&train_x, &train_y, vectorizer.n_features(), &config.fit)?;

    let predicted = test_x
        .iter()
        .map(|row| model.predict(row).cloned())
        .collect::<Result<Vec<_>, _>>()?;
    let report = evaluate(&test_y, &predicted);

    tracing::info!(
        train_rows = split.train.len(),
        validation_rows = split.test.len(),
        features = vectorizer.n_features(),
        accuracy = report.accuracy,
        "trained topic classifier"
    );

    Ok(TrainingOutcome {
        artifacts: ModelArtifacts {
            vectorizer,
            model,
            corpus_digest: corpus_digest(&balanced),
        },
        report,
        balanced_counts,
        train_rows: split.train.len(),
        validation_rows: split.test.len(),
        converged: summary.converged,
    })
}
