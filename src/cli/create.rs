//! Create command - create or update the automation pull request

use crate::cli::context::CommandContext;
use anyhow::{Context, Result};
use prsync::types::ActionReport;
use std::io::Read;
use std::path::Path;

/// Run the create command
pub async fn run_create(
    ctx: &CommandContext,
    report: Option<&Path>,
    title: String,
    reset_description: bool,
) -> Result<()> {
    let action = ctx.action()?;

    let text = match report {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read report from stdin")?;
            buf
        }
    };

    let state = action
        .create_action(&ActionReport::new(title, text), reset_description)
        .await?;
    println!("{} {}: {state}", ctx.settings.repository, ctx.branches_summary());
    Ok(())
}
