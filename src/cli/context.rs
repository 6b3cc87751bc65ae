//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by create and clean.

use prsync::config::{Settings, load_settings};
use prsync::error::Result;
use prsync::platform::GitHubGraphClient;
use prsync::reconcile::PullRequestAction;
use prsync::render::MarkdownRenderer;
use prsync::vcs::{PipelineBranches, VersionControl};
use std::path::Path;

/// Shared context for CLI commands that talk to GitHub
///
/// Owns the collaborators that a [`PullRequestAction`] borrows.
pub struct CommandContext {
    /// Loaded settings file
    pub settings: Settings,
    /// GraphQL transport
    pub client: GitHubGraphClient,
    /// Branch naming
    pub branches: PipelineBranches,
    /// Body renderer
    pub renderer: MarkdownRenderer,
}

impl CommandContext {
    /// Load settings and build the GitHub client
    pub fn new(config: &Path, token: &str) -> Result<Self> {
        let settings = load_settings(config)?;
        let client = GitHubGraphClient::new(token, settings.host.as_deref())?;
        let branches = PipelineBranches::new(
            settings.branches.target.clone(),
            settings.branches.pipeline_id.clone(),
            settings.branches.prefix.clone(),
        );

        Ok(Self {
            settings,
            client,
            branches,
            renderer: MarkdownRenderer,
        })
    }

    /// Build the pull request action, validating the action settings
    pub fn action(&self) -> Result<PullRequestAction<'_>> {
        PullRequestAction::new(
            self.settings.action.clone(),
            self.settings.repository.clone(),
            &self.client,
            &self.branches,
            &self.renderer,
        )
    }

    /// Working and target branch, for display
    pub fn branches_summary(&self) -> String {
        let branches = self.branches.branches();
        format!("{} -> {}", branches.working, branches.target)
    }
}
