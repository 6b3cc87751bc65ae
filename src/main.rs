//! prsync command line

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::Cli::parse().init_tracing_subscriber()?.run().await
}
