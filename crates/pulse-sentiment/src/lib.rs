//! Lexicon-based polarity scoring for short social and news text.
//!
//! Polarity is the mean weight of the sentiment-bearing words in a text,
//! adjusted for intensifiers ("very good") and negation ("not good"), and
//! mapped to a [`pulse_core::Sentiment`] label with fixed thresholds.

pub mod scorer;

pub use scorer::{lexicon_polarity, score, score_text};
