//! AquaSentinel
//!
//! Infers water-quality health risks from ambient humidity and temperature
//! readings and prints the verdict as JSON.

use anyhow::Result;
use aquasentinel_cli::{run, Cli};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run(cli).await
}

/// Logs go to stderr so stdout carries only the JSON result
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "aquasentinel=debug,aquasentinel_inference=debug,aquasentinel_cli=debug"
    } else {
        "aquasentinel=info,aquasentinel_inference=info,aquasentinel_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
