//! Source loading, normalization, and aggregation for the pulse dashboard.
//!
//! Raw platform exports are combined and cleaned once by
//! [`combine_and_clean`]. Each query then reloads the cleaned dataset,
//! scores and classifies every post, and aggregates the result into topic
//! summaries, daily trends, and the overall pulse index.

pub mod aggregate;
pub mod analyze;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod sources;

pub use aggregate::{
    daily_trends, explode, normalized_score, pulse_index, summarize_topics, topic_breakdown,
    topic_trend, try_daily_trends, try_pulse_index, try_summarize_topics, try_topic_breakdown,
    try_topic_trend, PulseIndex, PulseLabel, PulseTrend, TopicBreakdown, DEFAULT_CONTENT_LIMIT,
    DEFAULT_TREND_WINDOW,
};
pub use analyze::{analyze, analyze_record};
pub use error::{AggregationError, AnalyticsError};
pub use normalize::{normalize, parse_timestamp, CleanRecord, RawRecord};
pub use pipeline::PulseService;
pub use sources::{combine_and_clean, load_cleaned, load_raw_sources, write_cleaned, SOURCES};
