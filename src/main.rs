use clap::Parser;
use fleetmap::cli::commands;
use fleetmap::cli::Cli;
use std::process;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    debug!("Starting fleetmap v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = commands::run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so command output stays pipeable. `RUST_LOG` wins over
/// `--verbose` when set.
fn init_logging(verbose: bool) {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let builder = FmtSubscriber::builder().with_writer(std::io::stderr);
    let result = match EnvFilter::try_from_default_env() {
        Ok(filter) => tracing::subscriber::set_global_default(
            builder.with_env_filter(filter).finish(),
        ),
        Err(_) => tracing::subscriber::set_global_default(
            builder.with_max_level(log_level).finish(),
        ),
    };

    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}
