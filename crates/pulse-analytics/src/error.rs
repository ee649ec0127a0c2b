use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("aggregation failed: {0}")]
    Aggregation(#[from] AggregationError),
}

/// A post that cannot be aggregated.
///
/// Returned by the `try_*` aggregation functions; the public views log it and
/// degrade to an empty result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("post has no categories: {text:?}")]
    MissingCategory { text: String },

    #[error("polarity {polarity} is outside [-1, 1]")]
    InvalidPolarity { polarity: f64 },
}
