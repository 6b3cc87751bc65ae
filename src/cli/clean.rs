//! Clean command - close the pull request when nothing is left to merge

use crate::cli::context::CommandContext;
use anyhow::Result;
use prsync::types::ActionReport;

/// Run the clean command
pub async fn run_clean(ctx: &CommandContext) -> Result<()> {
    let action = ctx.action()?;
    let state = action.clean_action(&ActionReport::default()).await?;
    println!("{} {}: {state}", ctx.settings.repository, ctx.branches_summary());
    Ok(())
}
