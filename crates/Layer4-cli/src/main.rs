//! ProofReg CLI - Main entry point

mod cli;

use clap::{Parser, Subcommand};
use proofreg_foundation::{Environment, RegistryConfig, RunMode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// ProofReg - inspect the proof service registry
#[derive(Parser, Debug)]
#[command(name = "proofreg")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Run in devel mode (enables refresh and devel-only checkers)
    #[arg(long)]
    devel: bool,

    /// Feature flag to enable (repeatable, e.g. --feature admin)
    #[arg(long = "feature")]
    features: Vec<String>,

    /// Read param proofs from a local JSON file
    #[arg(long)]
    store_path: Option<String>,

    /// Fetch param proofs from an HTTP(S) endpoint
    #[arg(long)]
    store_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all proof checker keys
    List,
    /// Show a single service
    Lookup {
        /// Service key (case-insensitive)
        name: String,
    },
    /// Validate a username against a service
    Check {
        /// Service key (case-insensitive)
        service: String,
        /// Username to normalize
        username: String,
    },
    /// Refresh remote param proofs once and print the report
    Refresh,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let mut config = RegistryConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}", e);
        RegistryConfig::default()
    });

    // 커맨드라인 옵션이 설정 파일과 환경 변수보다 우선
    if args.devel {
        config = config.run_mode(RunMode::Devel);
    }
    for flag in &args.features {
        config = config.feature(flag.clone());
    }
    if let Some(path) = &args.store_path {
        config = config.store_path(path.clone());
    }
    if let Some(url) = &args.store_url {
        config = config.store_url(url.clone());
    }

    let env = Environment::detect(&config);
    tracing::debug!(
        "Environment: run_mode={}, features={:?}, in_ci={}",
        env.run_mode,
        env.features.iter().collect::<Vec<_>>(),
        env.in_ci
    );

    let services = proofreg_core::ProofServices::from_config(&config, &env)?;

    match args.command {
        Command::List => cli::list(&services).await,
        Command::Lookup { name } => cli::lookup(&services, &name).await,
        Command::Check { service, username } => cli::check(&services, &service, &username).await,
        Command::Refresh => cli::refresh(&services).await,
    }
}
