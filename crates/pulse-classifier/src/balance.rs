//! Upsampling of minority categories before training.

use std::collections::BTreeMap;

use pulse_core::Category;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::corpus::LabeledExample;

/// Count examples per category.
#[must_use]
pub fn class_counts(examples: &[LabeledExample]) -> BTreeMap<Category, usize> {
    let mut counts = BTreeMap::new();
    for example in examples {
        *counts.entry(example.category.clone()).or_insert(0) += 1;
    }
    counts
}

/// Upsample every category to the size of the largest one.
///
/// Each category keeps all of its original rows and is topped up with rows
/// drawn with replacement from itself, so afterwards every category has
/// exactly the pre-balance maximum count. The result is shuffled with `rng`.
#[must_use]
pub fn balance_classes<R: Rng + ?Sized>(
    examples: &[LabeledExample],
    rng: &mut R,
) -> Vec<LabeledExample> {
    let mut groups: BTreeMap<&Category, Vec<&LabeledExample>> = BTreeMap::new();
    for example in examples {
        groups.entry(&example.category).or_default().push(example);
    }

    let Some(max_count) = groups.values().map(Vec::len).max() else {
        return Vec::new();
    };

    let mut balanced = Vec::with_capacity(max_count * groups.len());
    for group in groups.values() {
        balanced.extend(group.iter().map(|&e| e.clone()));
        for _ in group.len()..max_count {
            let pick = group[rng.random_range(0..group.len())];
            balanced.push(pick.clone());
        }
    }

    balanced.shuffle(rng);
    balanced
}
