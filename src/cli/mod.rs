//! The CLI for `prsync`.

mod clean;
mod context;
mod create;

use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

const ABOUT: &str = "Keep a single automation pull request in sync with a generated report";

/// The CLI application for `prsync`.
#[derive(Parser, Debug, Clone)]
#[command(about = ABOUT, version)]
pub struct Cli {
    /// Verbosity level (0-4)
    #[arg(short, action = ArgAction::Count, global = true)]
    pub v: u8,
    /// Path to the settings file
    #[arg(long, short, default_value = "prsync.toml", global = true)]
    pub config: PathBuf,
    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create or update the pull request for a report
    Create {
        /// Report file (reads stdin when omitted)
        #[arg(long)]
        report: Option<PathBuf>,
        /// Pull request title when the settings file does not set one
        #[arg(long, default_value = "")]
        title: String,
        /// Rebuild the body from this report instead of accumulating
        #[arg(long)]
        reset_description: bool,
    },
    /// Close the pull request if its branch no longer carries changes
    Clean,
}

impl Cli {
    /// Run the CLI application with the given arguments.
    pub async fn run(self) -> Result<()> {
        let token = self
            .token
            .ok_or_else(|| anyhow!("No GitHub token. Set GITHUB_TOKEN or pass --token."))?;
        let ctx = context::CommandContext::new(&self.config, &token)?;

        match self.command {
            Command::Create {
                report,
                title,
                reset_description,
            } => create::run_create(&ctx, report.as_deref(), title, reset_description).await,
            Command::Clean => clean::run_clean(&ctx).await,
        }
    }

    /// Initializes the tracing subscriber
    pub fn init_tracing_subscriber(self) -> Result<Self> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(match self.v {
                0 => Level::ERROR,
                1 => Level::WARN,
                2 => Level::INFO,
                3 => Level::DEBUG,
                _ => Level::TRACE,
            })
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))?;

        Ok(self)
    }
}
