//! General-purpose lexicon scorer for social and news snippets.

use pulse_core::Sentiment;

/// Word polarity weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("best", 1.0),
    ("better", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("happy", 0.8),
    ("glad", 0.5),
    ("proud", 0.8),
    ("win", 0.8),
    ("won", 0.6),
    ("victory", 0.6),
    ("success", 0.3),
    ("successful", 0.75),
    ("beautiful", 0.85),
    ("nice", 0.6),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("safe", 0.5),
    ("improve", 0.3),
    ("improved", 0.3),
    ("progress", 0.3),
    ("support", 0.2),
    ("hope", 0.3),
    ("helpful", 0.4),
    ("fair", 0.7),
    ("fire", 0.4),
    ("wicked", 0.3),
    ("vibes", 0.4),
    ("blessed", 0.6),
    ("strong", 0.43),
    ("well", 0.2),
    ("deserve", 0.2),
    ("celebrate", 0.5),
    ("peace", 0.4),
    ("thank", 0.4),
    ("thanks", 0.4),
    // Negative signals
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("poor", -0.4),
    ("sad", -0.5),
    ("angry", -0.5),
    ("hate", -0.8),
    ("fear", -0.6),
    ("afraid", -0.6),
    ("crime", -0.4),
    ("violence", -0.6),
    ("violent", -0.8),
    ("murder", -0.8),
    ("killed", -0.7),
    ("shooting", -0.6),
    ("dangerous", -0.6),
    ("corrupt", -0.5),
    ("corruption", -0.5),
    ("suffer", -0.5),
    ("suffering", -0.5),
    ("shortage", -0.4),
    ("unaffordable", -0.6),
    ("expensive", -0.5),
    ("crisis", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.5),
    ("problem", -0.3),
    ("broken", -0.4),
    ("lost", -0.3),
    ("lose", -0.3),
    ("struggle", -0.4),
    ("struggling", -0.4),
    ("unfair", -0.5),
    ("rising", -0.2),
    ("wrong", -0.5),
    ("stupid", -0.8),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
];

/// Words that scale the polarity of the following sentiment word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("so", 1.2),
    ("extremely", 1.5),
    ("too", 1.2),
    ("super", 1.3),
    ("totally", 1.3),
    ("pure", 1.2),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "none", "neither", "nor", "cannot", "cant",
    "cyaan", "nah", "dont", "doesnt", "didnt", "isnt", "wasnt", "wont",
];

/// Negation flips and halves the following sentiment word.
const NEGATION_FACTOR: f64 = -0.5;

/// Negation and intensity only reach this many tokens ahead.
const MODIFIER_REACH: usize = 3;

fn lookup(table: &[(&str, f64)], word: &str) -> Option<f64> {
    table.iter().find(|(w, _)| *w == word).map(|&(_, v)| v)
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

fn normalize_word(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase()
        .replace('\u{2019}', "'")
}

/// Compute a polarity in `[-1.0, 1.0]` for `text`.
///
/// Each lexicon word contributes its weight, scaled by a preceding
/// intensifier and flipped by a preceding negator within
/// [`MODIFIER_REACH`] tokens. The result is the mean contribution, or
/// `0.0` when the text has no sentiment-bearing words.
#[must_use]
pub fn lexicon_polarity(text: &str) -> f64 {
    let mut total = 0.0_f64;
    let mut hits = 0_u32;
    let mut intensity = 1.0_f64;
    let mut negated = false;
    let mut since_modifier = 0_usize;

    for raw in text.split_whitespace() {
        let word = normalize_word(raw);
        if word.is_empty() {
            continue;
        }

        if is_negator(&word) {
            negated = true;
            since_modifier = 0;
            continue;
        }
        if let Some(scale) = lookup(INTENSIFIERS, &word) {
            intensity *= scale;
            since_modifier = 0;
            continue;
        }

        if let Some(weight) = lookup(LEXICON, &word) {
            let mut contribution = weight * intensity;
            if negated {
                contribution *= NEGATION_FACTOR;
            }
            total += contribution.clamp(-1.0, 1.0);
            hits += 1;
            intensity = 1.0;
            negated = false;
            since_modifier = 0;
            continue;
        }

        since_modifier += 1;
        if since_modifier >= MODIFIER_REACH {
            intensity = 1.0;
            negated = false;
        }
    }

    if hits == 0 {
        return 0.0;
    }
    (total / f64::from(hits)).clamp(-1.0, 1.0)
}

/// Score text that may be absent.
///
/// `None`, empty, and whitespace-only input score `(0.0, Neutral)`.
#[must_use]
pub fn score(text: Option<&str>) -> (f64, Sentiment) {
    match text {
        Some(t) => score_text(t),
        None => (0.0, Sentiment::Neutral),
    }
}

/// Score text and label it with the fixed polarity thresholds.
#[must_use]
pub fn score_text(text: &str) -> (f64, Sentiment) {
    if text.trim().is_empty() {
        return (0.0, Sentiment::Neutral);
    }
    let polarity = lexicon_polarity(text);
    (polarity, Sentiment::from_polarity(polarity))
}
