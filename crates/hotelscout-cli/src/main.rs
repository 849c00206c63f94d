mod export;
mod input;
mod scan;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hotelscout_store::AggregateFormat;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hotelscout")]
#[command(about = "Detect sponsored hotel stays on creator profiles and enrich hotel contacts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan the profiles listed in a CSV and append results to the aggregate file
    Scan(ScanArgs),
    /// Flatten an aggregate file into a per-post hotels CSV
    ExportHotels {
        /// Aggregate file (JSON document or NDJSON)
        #[arg(long, short = 'i', default_value = "outputs/all.json")]
        input: PathBuf,
        /// CSV file to write
        #[arg(long, short = 'o', default_value = "outputs/hotels.csv")]
        output: PathBuf,
    },
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// Input CSV containing a profile URL column
    #[arg(long)]
    csv: PathBuf,
    /// Header of the profile URL column
    #[arg(long, default_value = "Instagram Url")]
    url_column: String,
    /// Max posts per profile
    #[arg(long, default_value_t = 6)]
    limit: usize,
    /// Aggregate output file; profiles already present are skipped
    #[arg(long, default_value = "outputs/all.json")]
    out_file: PathBuf,
    /// Aggregate encoding: json or ndjson
    #[arg(long, default_value = "json")]
    aggregate_format: AggregateFormat,
    /// Places API key (overrides GOOGLE_PLACES_API_KEY)
    #[arg(long)]
    google_places_key: Option<String>,
    /// YAML detection vocabulary (overrides HOTELSCOUT_VOCABULARY_PATH)
    #[arg(long)]
    vocabulary: Option<PathBuf>,
    /// Disable the randomized pauses between posts and profiles
    #[arg(long)]
    no_pause: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = hotelscout_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan(args) => scan::run_scan(&config, &args).await,
        Commands::ExportHotels { input, output } => export::run_export_hotels(&input, &output),
    }
}
