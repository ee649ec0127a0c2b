//! Topic model command handlers: seeding a corpus, training, classifying.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use pulse_classifier::{
    check_taxonomy, load_labeled_csv, seed_corpus, train, write_labeled_csv, Classify,
    TopicClassifier, TrainingConfig,
};
use pulse_core::AppConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Subcommand)]
pub enum ModelCommands {
    /// Write a bootstrap labeled corpus built from the seed examples
    SeedCorpus {
        /// Output CSV path
        #[arg(long, default_value = "data/labeled_posts.csv")]
        out: PathBuf,
        /// Times each seed example is repeated
        #[arg(long, default_value = "20")]
        multiplier: usize,
    },
    /// Train the topic classifier and write its artifacts to PULSE_MODEL_DIR
    Train {
        /// Labeled corpus CSV with `text` and `category` columns
        #[arg(long)]
        labeled: PathBuf,
        /// Category taxonomy to validate labels against (defaults to PULSE_TAXONOMY_PATH)
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },
    /// Classify a single text with the trained model
    Classify { text: String },
}

pub(crate) fn run(config: &AppConfig, command: ModelCommands) -> anyhow::Result<()> {
    match command {
        ModelCommands::SeedCorpus { out, multiplier } => {
            run_seed_corpus(config, &out, multiplier)
        }
        ModelCommands::Train { labeled, taxonomy } => {
            run_train(config, &labeled, taxonomy.as_deref())
        }
        ModelCommands::Classify { text } => {
            let classifier = TopicClassifier::load(&config.model_dir);
            let categories = classifier.classify(Some(&text));
            println!("{}", serde_json::to_string(&categories)?);
            Ok(())
        }
    }
}

fn run_seed_corpus(config: &AppConfig, out: &Path, multiplier: usize) -> anyhow::Result<()> {
    if multiplier == 0 {
        anyhow::bail!("--multiplier must be at least 1");
    }
    let mut rng = StdRng::seed_from_u64(config.seed);
    let examples = seed_corpus(multiplier, &mut rng);
    write_labeled_csv(out, &examples)?;
    println!("wrote {} labeled rows to {}", examples.len(), out.display());
    Ok(())
}

/// Check labels against the taxonomy, train, save artifacts, and print the
/// validation report.
///
/// An explicit `--taxonomy` must exist. The configured default is skipped
/// with a warning when the file is absent.
///
/// # Errors
///
/// Returns an error if the corpus or taxonomy cannot be loaded, a label is
/// outside the taxonomy, training fails, or the artifacts cannot be written.
fn run_train(config: &AppConfig, labeled: &Path, taxonomy: Option<&Path>) -> anyhow::Result<()> {
    let examples = load_labeled_csv(labeled)?;

    match taxonomy {
        Some(path) => check_taxonomy(&examples, &pulse_core::load_taxonomy(path)?)?,
        None if config.taxonomy_path.exists() => {
            check_taxonomy(
                &examples,
                &pulse_core::load_taxonomy(&config.taxonomy_path)?,
            )?;
        }
        None => tracing::warn!(
            path = %config.taxonomy_path.display(),
            "taxonomy file not found; skipping label validation"
        ),
    }

    let outcome = train(&examples, &TrainingConfig::from_app_config(config))?;
    outcome.artifacts.save(&config.model_dir)?;

    println!(
        "trained on {} rows, validated on {} rows ({} per category after balancing)",
        outcome.train_rows,
        outcome.validation_rows,
        outcome.balanced_counts.values().next().copied().unwrap_or(0)
    );
    if !outcome.converged {
        println!("warning: optimizer hit the iteration cap (PULSE_MAX_ITER) before converging");
    }
    println!();
    print!("{}", outcome.report);
    println!();
    println!("artifacts written to {}", config.model_dir.display());
    Ok(())
}
