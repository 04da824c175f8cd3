use crate::server;
use clap::{Args, Parser, Subcommand};
use listing_alerts::error::AppError;
use listing_alerts::workflows::intake::{evaluate_listing, ListingEvaluation};
use listing_alerts::workflows::matching::{MatchConfig, MatchEngine, DEFAULT_MATCH_THRESHOLD};
use listing_alerts::workflows::profiles::{JsonProfileSource, ProfileSource};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Listing Alerts",
    about = "Match new Realworks listings against buyer search profiles and notify them",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a saved Realworks object against a profile file without sending anything
    Match(MatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Path to a Realworks object JSON document
    #[arg(long)]
    pub(crate) listing: PathBuf,
    /// Path to a JSON array of search profiles
    #[arg(long)]
    pub(crate) profiles: PathBuf,
    /// Minimum score a profile needs to qualify
    #[arg(long, default_value_t = DEFAULT_MATCH_THRESHOLD, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) threshold: u8,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => {
            let evaluation = run_match(&args).await?;
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
            Ok(())
        }
    }
}

pub(crate) async fn run_match(args: &MatchArgs) -> Result<ListingEvaluation, AppError> {
    let raw = tokio::fs::read_to_string(&args.listing).await?;
    let object: serde_json::Value = serde_json::from_str(&raw)?;
    let profiles = JsonProfileSource::new(&args.profiles).profiles().await?;
    let engine = MatchEngine::new(MatchConfig::with_threshold(args.threshold));

    Ok(evaluate_listing(&object, &profiles, &engine)?)
}
