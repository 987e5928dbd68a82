use clap::{Parser, Subcommand};
use options_risk_core::{ConfigLoader, EngineConfig};
use options_risk_engine::RiskEngine;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{AssessArgs, DecayArgs, ParseSymbolArgs, StopLossArgs};

#[derive(Parser)]
#[command(name = "options-risk")]
#[command(about = "Stop-loss policy and theta decay projections for option contracts", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(
        short,
        long,
        global = true,
        env = "OPTIONS_RISK_CONFIG",
        default_value = "config/Config.toml"
    )]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an option symbol into ticker, expiry, right and strike
    Parse(ParseSymbolArgs),
    /// Compute a policy-enforced stop-loss for a position
    StopLoss(StopLossArgs),
    /// Project weekly theta decay
    Decay(DecayArgs),
    /// Full risk assessment for one option symbol
    Assess(AssessArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    // stderr keeps stdout clean for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let engine = RiskEngine::new(&config);

    match cli.command {
        Commands::Parse(args) => commands::run_parse_symbol(&args)?,
        Commands::StopLoss(args) => commands::run_stop_loss(&engine, &args)?,
        Commands::Decay(args) => commands::run_decay(config.decay.weekly_rate, &args)?,
        Commands::Assess(args) => commands::run_assess(&engine, &args)?,
    }

    Ok(())
}

/// Loads config under a `RUST_LOG`-only subscriber, since `logging.level`
/// is not known until the file has been read.
fn load_config(path: &str) -> anyhow::Result<EngineConfig> {
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::with_default(bootstrap, || ConfigLoader::load_from(path))
}
