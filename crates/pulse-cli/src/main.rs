mod model;
mod views;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::model::ModelCommands;

#[derive(Debug, Parser)]
#[command(name = "pulse")]
#[command(about = "Sentiment and topic analytics for social and news posts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Combine the raw platform exports into the cleaned dataset
    Clean,
    #[command(flatten)]
    Model(ModelCommands),
    /// Score the sentiment of a single text
    Score { text: String },
    /// Print every analyzed post as JSON
    Bulk,
    /// Print per-topic sentiment summaries as JSON
    Topics,
    /// Print daily sentiment trends as JSON
    Trends {
        /// Restrict to one topic and return only its most recent buckets
        #[arg(long)]
        topic: Option<String>,
        /// Number of date buckets for --topic (defaults to PULSE_TREND_WINDOW)
        #[arg(long, requires = "topic")]
        window: Option<usize>,
    },
    /// Print the overall pulse index as JSON
    Pulse,
    /// Describe the sentiment mix of one topic
    Breakdown { topic: String },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(
        env = %config.env,
        data_dir = %config.data_dir.display(),
        model_dir = %config.model_dir.display(),
        "loaded configuration"
    );

    let cli = Cli::parse();
    match cli.command {
        Commands::Clean => views::run_clean(&config)?,
        Commands::Model(command) => model::run(&config, command)?,
        Commands::Score { text } => views::run_score(&text)?,
        Commands::Bulk => views::print_json(&views::service(&config).bulk())?,
        Commands::Topics => views::print_json(&views::service(&config).topics())?,
        Commands::Trends {
            topic: Some(topic),
            window,
        } => views::print_json(&views::service(&config).topic_trend(&topic, window))?,
        Commands::Trends { topic: None, .. } => {
            views::print_json(&views::service(&config).trends())?;
        }
        Commands::Pulse => views::print_json(&views::service(&config).pulse())?,
        Commands::Breakdown { topic } => views::run_breakdown(&config, &topic),
    }

    Ok(())
}
