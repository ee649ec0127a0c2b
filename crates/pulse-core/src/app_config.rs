use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Root of the on-disk dataset.
    pub data_dir: PathBuf,
    /// Directory holding the per-platform raw CSV exports.
    pub raw_dir: PathBuf,
    /// Combined, cleaned dataset written by `clean` and read per request.
    pub cleaned_path: PathBuf,
    /// Directory holding `vectorizer.json` and `model.json`.
    pub model_dir: PathBuf,
    pub taxonomy_path: PathBuf,
    pub max_features: usize,
    pub max_iter: usize,
    /// Validation fraction for the stratified split, in `(0, 1)`.
    pub test_size: f64,
    pub seed: u64,
    /// Character cap on the joined sample text in topic summaries.
    pub content_limit: usize,
    /// Number of most recent date buckets returned for a single topic.
    pub trend_window: usize,
}
