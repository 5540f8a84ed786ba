mod analyze;
mod render;
mod survey_file;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use presence_core::{CompetitorEntry, EngagementBucket, FrequencyBucket};
use tracing_subscriber::EnvFilter;

use crate::survey_file::parse_competitor;

#[derive(Debug, Parser)]
#[command(name = "presence-cli")]
#[command(about = "Founder presence score and competitive analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, global = true, env = "PRESENCE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the answer vocabularies the survey accepts
    Options,
    /// Score posting activity against competitors without storing anything
    Score {
        /// Your posts per month (e.g. "3-5")
        #[arg(long)]
        frequency: FrequencyBucket,
        /// Your average likes per post (e.g. "50-100")
        #[arg(long)]
        engagement: EngagementBucket,
        /// Competitor as NAME:FREQUENCY:ENGAGEMENT, repeatable
        #[arg(long = "competitor", value_parser = parse_competitor)]
        competitors: Vec<CompetitorEntry>,
        /// Print the score snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a full survey file through analysis and print the dashboard
    Analyze {
        /// Survey answers as JSON or YAML
        #[arg(long)]
        input: PathBuf,
        /// Print the snapshot and insight as JSON instead of the dashboard
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Options) => print!("{}", render::render_options()),
        Some(Commands::Score {
            frequency,
            engagement,
            competitors,
            json,
        }) => analyze::run_score(frequency, engagement, competitors, json)?,
        Some(Commands::Analyze { input, json }) => analyze::run_analyze(&input, json).await?,
        None => println!("presence-cli ready; run with --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
