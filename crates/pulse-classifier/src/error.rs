use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("labeled corpus is empty")]
    EmptyCorpus,

    #[error("no terms survived tokenization and stop-word removal")]
    EmptyVocabulary,

    #[error("insufficient training data: {0}")]
    InsufficientData(String),

    #[error("invalid test size {0}; must be in (0, 1)")]
    InvalidTestSize(f64),

    #[error("vectorizer has not been fitted")]
    NotFitted,

    #[error("feature dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("category '{0}' is not in the taxonomy")]
    UnknownCategory(String),

    #[error("{file} has format version {found}, expected {expected}")]
    ArtifactVersion {
        file: String,
        found: u32,
        expected: u32,
    },

    #[error("vectorizer and model were trained on different corpora")]
    DigestMismatch,

    #[error("inconsistent artifact: {0}")]
    CorruptArtifact(String),
}

/// Why a single `classify` call could not produce a category.
///
/// Never surfaces past [`crate::Classify::classify`], which maps every
/// variant to the fallback category.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("classifier artifacts are not loaded")]
    Unavailable,

    #[error("input text is empty")]
    EmptyInput,

    #[error("model error: {0}")]
    Model(#[from] ClassifierError),
}
