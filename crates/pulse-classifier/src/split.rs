//! Stratified train/validation split.

use std::collections::BTreeMap;

use pulse_core::Category;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ClassifierError;

/// Row indices for each side of a split, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split row indices so each category keeps its proportion on both sides.
///
/// Each category sends `round(n * test_size)` of its rows to validation,
/// clamped so that a category with two or more rows has at least one on
/// each side. A category with a single row stays in training.
///
/// # Errors
///
/// Returns [`ClassifierError::InvalidTestSize`] if `test_size` is outside
/// `(0, 1)`, [`ClassifierError::EmptyCorpus`] for no labels, and
/// [`ClassifierError::InsufficientData`] if the validation side would be empty.
pub fn stratified_split<R: Rng + ?Sized>(
    labels: &[Category],
    test_size: f64,
    rng: &mut R,
) -> Result<Split, ClassifierError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ClassifierError::InvalidTestSize(test_size));
    }
    if labels.is_empty() {
        return Err(ClassifierError::EmptyCorpus);
    }

    let mut by_class: BTreeMap<&Category, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }

    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();
    for indices in by_class.values_mut() {
        indices.shuffle(rng);
        let n = indices.len();
        let n_test = if n < 2 {
            0
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            let rounded = (n as f64 * test_size).round() as usize;
            rounded.clamp(1, n - 1)
        };
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    if test.is_empty() {
        return Err(ClassifierError::InsufficientData(
            "no category has enough rows for a validation fold".to_string(),
        ));
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(Split { train, test })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn labels(counts: &[(&str, usize)]) -> Vec<Category> {
        counts
            .iter()
            .flat_map(|&(name, n)| std::iter::repeat(Category::new(name)).take(n))
            .collect()
    }

    #[test]
    fn seventy_thirty_per_class() {
        let y = labels(&[("A", 10), ("B", 20)]);
        let split = stratified_split(&y, 0.3, &mut StdRng::seed_from_u64(42)).unwrap();
        let test_a = split.test.iter().filter(|&&i| y[i].as_str() == "A").count();
        let test_b = split.test.iter().filter(|&&i| y[i].as_str() == "B").count();
        assert_eq!(test_a, 3);
        assert_eq!(test_b, 6);
        assert_eq!(split.train.len(), 21);
    }

    #[test]
    fn sides_are_disjoint_and_cover_all_rows() {
        let y = labels(&[("A", 7), ("B", 5), ("C", 3)]);
        let split = stratified_split(&y, 0.3, &mut StdRng::seed_from_u64(1)).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..y.len()).collect::<Vec<_>>());
    }

    #[test]
    fn small_class_keeps_a_row_on_each_side() {
        let y = labels(&[("A", 2), ("B", 10)]);
        let split = stratified_split(&y, 0.1, &mut StdRng::seed_from_u64(9)).unwrap();
        assert!(split.test.iter().any(|&i| y[i].as_str() == "A"));
        assert!(split.train.iter().any(|&i| y[i].as_str() == "A"));
    }

    #[test]
    fn singleton_class_stays_in_training() {
        let y = labels(&[("A", 1), ("B", 10)]);
        let split = stratified_split(&y, 0.3, &mut StdRng::seed_from_u64(9)).unwrap();
        assert!(split.train.contains(&0));
        assert!(!split.test.contains(&0));
    }

    #[test]
    fn invalid_test_size_rejected() {
        let y = labels(&[("A", 4)]);
        for size in [0.0, 1.0, -0.5, f64::NAN] {
            assert!(matches!(
                stratified_split(&y, size, &mut StdRng::seed_from_u64(0)),
                Err(ClassifierError::InvalidTestSize(_))
            ));
        }
    }

    #[test]
    fn all_singletons_is_insufficient() {
        let y = labels(&[("A", 1), ("B", 1)]);
        assert!(matches!(
            stratified_split(&y, 0.3, &mut StdRng::seed_from_u64(0)),
            Err(ClassifierError::InsufficientData(_))
        ));
    }
}
