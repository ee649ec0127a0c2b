//! Inference-time classification service.

use std::path::Path;

use pulse_core::Category;

use crate::artifacts::ModelArtifacts;
use crate::error::ClassificationError;

/// Text-to-category classification.
///
/// Implementors provide [`Classify::try_classify`]; callers use
/// [`Classify::classify`], which never fails and maps every error to the
/// fallback `["Other"]`.
pub trait Classify: Send + Sync {
    /// Classify `text`, surfacing why it could not be classified.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError`] when the model is unavailable, the
    /// input is empty, or feature extraction or prediction fails.
    fn try_classify(&self, text: &str) -> Result<Vec<Category>, ClassificationError>;

    /// Classify possibly-absent text, falling back to `["Other"]`.
    fn classify(&self, text: Option<&str>) -> Vec<Category> {
        let Some(text) = text else {
            return vec![Category::other()];
        };
        match self.try_classify(text) {
            Ok(categories) if !categories.is_empty() => categories,
            Ok(_) => vec![Category::other()],
            Err(e) => {
                tracing::debug!(error = %e, "classification fell back to Other");
                vec![Category::other()]
            }
        }
    }
}

/// The trained vectorizer and model, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    artifacts: Option<ModelArtifacts>,
}

impl TopicClassifier {
    #[must_use]
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self {
            artifacts: Some(artifacts),
        }
    }

    /// A classifier with no model; every call falls back to `Other`.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { artifacts: None }
    }

    /// Load artifacts from `dir`.
    ///
    /// A load failure is logged here, once, and yields an unavailable
    /// classifier rather than an error.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        match ModelArtifacts::load(dir) {
            Ok(artifacts) => {
                tracing::info!(
                    dir = %dir.display(),
                    features = artifacts.vectorizer.n_features(),
                    classes = artifacts.model.classes().len(),
                    "loaded topic classifier"
                );
                Self::new(artifacts)
            }
            Err(e) => {
                tracing::warn!(
                    dir = %dir.display(),
                    error = %e,
                    "failed to load topic classifier; all posts will be categorized as Other"
                );
                Self::unavailable()
            }
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.artifacts.is_some()
    }
}

impl Classify for TopicClassifier {
    fn try_classify(&self, text: &str) -> Result<Vec<Category>, ClassificationError> {
        let artifacts = self
            .artifacts
            .as_ref()
            .ok_or(ClassificationError::Unavailable)?;
        if text.trim().is_empty() {
            return Err(ClassificationError::EmptyInput);
        }
        let row = artifacts.vectorizer.transform(text)?;
        let category = artifacts.model.predict(&row)?;
        Ok(vec![category.clone()])
    }
}
