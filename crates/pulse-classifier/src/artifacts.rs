//! Persistence of the fitted vectorizer and model as a matched pair.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::corpus::LabeledExample;
use crate::error::ClassifierError;
use crate::model::OneVsRestLogistic;
use crate::vectorizer::TfidfVectorizer;

pub const FORMAT_VERSION: u32 = 1;
pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const MODEL_FILE: &str = "model.json";

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    format_version: u32,
    corpus_digest: String,
    artifact: T,
}

/// A fitted vectorizer and the model trained on its features.
///
/// Both files carry the digest of the corpus they were fitted on; a pair
/// with different digests is rejected at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifacts {
    pub vectorizer: TfidfVectorizer,
    pub model: OneVsRestLogistic,
    pub corpus_digest: String,
}

/// SHA-256 over every `category \0 text` row, hex-encoded.
#[must_use]
pub fn corpus_digest(examples: &[LabeledExample]) -> String {
    let mut hasher = Sha256::new();
    for example in examples {
        hasher.update(example.category.as_str().as_bytes());
        hasher.update(b"\x00");
        hasher.update(example.text.as_bytes());
        hasher.update(b"\x00");
    }
    format!("{:x}", hasher.finalize())
}

fn io_error(path: &Path, source: std::io::Error) -> ClassifierError {
    ClassifierError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn write_envelope<T: Serialize>(
    path: &Path,
    digest: &str,
    artifact: &T,
) -> Result<(), ClassifierError> {
    let envelope = Envelope {
        format_version: FORMAT_VERSION,
        corpus_digest: digest.to_string(),
        artifact,
    };
    let json = serde_json::to_vec(&envelope)?;
    std::fs::write(path, json).map_err(|e| io_error(path, e))
}

fn read_envelope<T: DeserializeOwned>(path: &Path) -> Result<Envelope<T>, ClassifierError> {
    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
    if envelope.format_version != FORMAT_VERSION {
        return Err(ClassifierError::ArtifactVersion {
            file: path.display().to_string(),
            found: envelope.format_version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(envelope)
}

impl ModelArtifacts {
    /// Write `vectorizer.json` and `model.json` into `dir`, creating it.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Io`] or [`ClassifierError::Json`] on failure.
    pub fn save(&self, dir: &Path) -> Result<(), ClassifierError> {
        std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        write_envelope(&dir.join(VECTORIZER_FILE), &self.corpus_digest, &self.vectorizer)?;
        write_envelope(&dir.join(MODEL_FILE), &self.corpus_digest, &self.model)?;
        tracing::info!(
            dir = %dir.display(),
            features = self.vectorizer.n_features(),
            classes = self.model.classes().len(),
            "saved classifier artifacts"
        );
        Ok(())
    }

    /// Load both artifacts from `dir` and check they belong together.
    ///
    /// # Errors
    ///
    /// Fails if either file is missing or malformed, has another format
    /// version, the corpus digests differ, either artifact is internally
    /// inconsistent, or the vectorizer's feature count differs from the
    /// model's.
    pub fn load(dir: &Path) -> Result<Self, ClassifierError> {
        let vectorizer: Envelope<TfidfVectorizer> = read_envelope(&dir.join(VECTORIZER_FILE))?;
        let model: Envelope<OneVsRestLogistic> = read_envelope(&dir.join(MODEL_FILE))?;

        if vectorizer.corpus_digest != model.corpus_digest {
            return Err(ClassifierError::DigestMismatch);
        }
        vectorizer.artifact.validate()?;
        model.artifact.validate()?;
        if vectorizer.artifact.n_features() != model.artifact.n_features() {
            return Err(ClassifierError::DimensionMismatch {
                expected: model.artifact.n_features(),
                got: vectorizer.artifact.n_features(),
            });
        }

        Ok(Self {
            vectorizer: vectorizer.artifact,
            model: model.artifact,
            corpus_digest: vectorizer.corpus_digest,
        })
    }
}
