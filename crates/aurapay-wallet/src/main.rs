//! AuraPay wallet: command-line front end for the wallet transaction layer

use std::process::ExitCode;

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    // Logs go to stderr; stdout carries JSON results only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::debug!("starting aurapay-wallet");
    cli::Cli::parse().run().await
}
