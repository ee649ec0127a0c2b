//! Supervised topic classifier.
//!
//! Training balances the labeled corpus, fits a unigram+bigram TF-IDF
//! vectorizer, splits 70/30 with stratification, and fits a one-vs-rest
//! logistic regression on the training fold. The fitted vectorizer and model
//! are persisted together and loaded read-only into a [`TopicClassifier`].

pub mod artifacts;
pub mod balance;
pub mod corpus;
pub mod error;
pub mod metrics;
pub mod model;
pub mod service;
pub mod split;
pub mod tokenize;
pub mod train;
pub mod vectorizer;

pub use artifacts::ModelArtifacts;
pub use balance::{balance_classes, class_counts};
pub use corpus::{load_labeled_csv, seed_corpus, write_labeled_csv, LabeledExample};
pub use error::{ClassificationError, ClassifierError};
pub use metrics::{evaluate, EvaluationReport};
pub use model::OneVsRestLogistic;
pub use service::{Classify, TopicClassifier};
pub use train::{check_taxonomy, train, TrainingConfig, TrainingOutcome};
pub use vectorizer::{SparseVector, TfidfVectorizer};
