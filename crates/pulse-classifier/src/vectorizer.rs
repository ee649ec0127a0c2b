//! TF-IDF feature extraction over unigrams and bigrams.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;
use crate::tokenize::analyze;

/// Sparse row: `(feature index, value)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// TF-IDF vectorizer with a bounded vocabulary.
///
/// The vocabulary keeps the `max_features` terms with the highest total
/// frequency across the fitted corpus (ties broken lexicographically) and
/// indexes them in lexicographic order. IDF is smoothed as
/// `ln((1 + n) / (1 + df)) + 1` and each row is L2-normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    ngram_range: (usize, usize),
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Unfitted vectorizer over unigrams and bigrams.
    #[must_use]
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            ngram_range: (1, 2),
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.idf.is_empty()
    }

    /// Check that the vocabulary and IDF table describe the same features.
    /// A deserialized vectorizer must pass before use.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::NotFitted`] for an empty IDF table and
    /// [`ClassifierError::CorruptArtifact`] for any other inconsistency.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted);
        }
        if self.vocabulary.len() != self.idf.len() {
            return Err(ClassifierError::CorruptArtifact(format!(
                "{} vocabulary terms but {} IDF weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if let Some((term, idx)) = self
            .vocabulary
            .iter()
            .find(|(_, &idx)| idx >= self.idf.len())
        {
            return Err(ClassifierError::CorruptArtifact(format!(
                "term '{term}' maps to feature {idx} of {}",
                self.idf.len()
            )));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::CorruptArtifact(format!(
                "invalid n-gram range ({min_n}, {max_n})"
            )));
        }
        Ok(())
    }

    /// Learn the vocabulary and IDF weights from `documents`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::EmptyCorpus`] for no documents and
    /// [`ClassifierError::EmptyVocabulary`] if no terms survive tokenization.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<(), ClassifierError> {
        if documents.is_empty() {
            return Err(ClassifierError::EmptyCorpus);
        }

        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = analyze(doc.as_ref(), self.ngram_range);
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *term_freq.entry(term).or_insert(0) += 1;
            }
        }

        if term_freq.is_empty() {
            return Err(ClassifierError::EmptyVocabulary);
        }

        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut kept: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort();

        #[allow(clippy::cast_precision_loss)]
        let n_docs = documents.len() as f64;

        self.vocabulary.clear();
        self.idf = Vec::with_capacity(kept.len());
        for (idx, term) in kept.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let df = doc_freq.get(&term).copied().unwrap_or(0) as f64;
            self.idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            self.vocabulary.insert(term, idx);
        }

        tracing::debug!(
            documents = documents.len(),
            features = self.idf.len(),
            "fitted TF-IDF vocabulary"
        );
        Ok(())
    }

    /// Convert one document into an L2-normalized sparse TF-IDF row.
    ///
    /// Terms outside the vocabulary are ignored, so text with no known
    /// terms yields an empty row.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::NotFitted`] before [`Self::fit`].
    pub fn transform(&self, document: &str) -> Result<SparseVector, ClassifierError> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted);
        }

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in analyze(document, self.ngram_range) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| {
                self.idf
                    .get(idx)
                    .map(|idf| (idx, tf * idf))
                    .ok_or(ClassifierError::DimensionMismatch {
                        expected: self.idf.len(),
                        got: idx + 1,
                    })
            })
            .collect::<Result<_, _>>()?;

        let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut row {
                *v /= norm;
            }
        }
        Ok(row)
    }

    /// Fit on `documents` and return their rows.
    ///
    /// # Errors
    ///
    /// See [`Self::fit`].
    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        documents: &[S],
    ) -> Result<Vec<SparseVector>, ClassifierError> {
        self.fit(documents)?;
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }
}
