//! Labeled training corpus: CSV I/O and the built-in seed examples.

use std::io::Read;
use std::path::Path;

use pulse_core::Category;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// One `(text, category)` training pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub text: String,
    pub category: Category,
}

impl LabeledExample {
    #[must_use]
    pub fn new(text: impl Into<String>, category: impl Into<Category>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LabeledRow {
    text: Option<String>,
    category: Option<String>,
}

/// Seed phrases per category, in English and Jamaican Patois.
const SEED_EXAMPLES: &[(&str, &str)] = &[
    ("The government must fix the roads.", "Politics & Government"),
    ("Gas prices are rising again, can't afford it.", "Economy & Cost of Living"),
    ("Crime is getting worse in Kingston last night.", "Crime & Safety"),
    ("New dancehall album dropped, it's fire!", "Entertainment & Music"),
    ("Reggae Boyz won the match, proud!", "Sports"),
    ("Water shortage in my area, people suffering.", "Social Issues"),
    ("Teachers deserve better pay now.", "Social Issues"),
    ("Police need to patrol the neighborhoods more.", "Crime & Safety"),
    ("Inflation has made groceries unaffordable.", "Economy & Cost of Living"),
    ("Politicians promise change but there's no action.", "Politics & Government"),
    ("The concert was amazing, great vibes!", "Entertainment & Music"),
    ("Local football team played well yesterday.", "Sports"),
    ("Di govment fi fix di road dem.", "Politics & Government"),
    ("Gas price raise again, cyaan afford nuttin.", "Economy & Cost of Living"),
    ("Crime a gwaan worse inna Kingston last night.", "Crime & Safety"),
    ("New dancehall album drop, pure fire!", "Entertainment & Music"),
    ("Mi glad fi see di Reggae Boyz win dem match!", "Sports"),
    ("Water shortage again, people a suffer.", "Social Issues"),
    ("Di teacher dem deserve better pay fi real.", "Social Issues"),
    ("Di police dem need fi patrol more inna di area.", "Crime & Safety"),
    ("Inflation mash up wi, grocery price sky high.", "Economy & Cost of Living"),
    ("Government a promise but nutten nah change.", "Politics & Government"),
    ("Di concert did wicked, vibes tun up!", "Entertainment & Music"),
    ("Di football team play good yesterday!", "Sports"),
];

/// Read a labeled corpus with `text` and `category` columns.
///
/// Rows missing either field (or blank after trimming) are dropped; text
/// and category are trimmed.
///
/// # Errors
///
/// Returns [`ClassifierError::Csv`] on malformed CSV.
pub fn read_labeled<R: Read>(reader: R) -> Result<Vec<LabeledExample>, ClassifierError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::None)
        .flexible(true)
        .from_reader(reader);

    let mut examples = Vec::new();
    let mut dropped = 0_usize;
    for row in csv_reader.deserialize::<LabeledRow>() {
        let row = row?;
        let text = row.text.as_deref().map(str::trim).unwrap_or_default();
        let category = row.category.as_deref().map(str::trim).unwrap_or_default();
        if text.is_empty() || category.is_empty() {
            dropped += 1;
            continue;
        }
        examples.push(LabeledExample::new(text, category));
    }

    tracing::info!(rows = examples.len(), dropped, "loaded labeled corpus");
    Ok(examples)
}

/// Load a labeled corpus CSV from disk.
///
/// # Errors
///
/// Returns [`ClassifierError::Io`] if the file cannot be opened and
/// [`ClassifierError::Csv`] on malformed CSV.
pub fn load_labeled_csv(path: &Path) -> Result<Vec<LabeledExample>, ClassifierError> {
    let file = std::fs::File::open(path).map_err(|e| ClassifierError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    read_labeled(file)
}

/// Write a labeled corpus as `text,category` CSV.
///
/// # Errors
///
/// Returns [`ClassifierError::Io`] or [`ClassifierError::Csv`] on write failure.
pub fn write_labeled_csv(path: &Path, examples: &[LabeledExample]) -> Result<(), ClassifierError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ClassifierError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for example in examples {
        writer.serialize(example)?;
    }
    writer.flush().map_err(|e| ClassifierError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

/// Build a bootstrap corpus: every seed example repeated `multiplier`
/// times, shuffled with `rng`.
#[must_use]
pub fn seed_corpus<R: Rng + ?Sized>(multiplier: usize, rng: &mut R) -> Vec<LabeledExample> {
    let mut examples: Vec<LabeledExample> = (0..multiplier)
        .flat_map(|_| SEED_EXAMPLES.iter())
        .map(|&(text, category)| LabeledExample::new(text, category))
        .collect();
    examples.shuffle(rng);
    examples
}
