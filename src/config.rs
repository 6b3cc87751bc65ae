//! Action configuration and the `prsync` settings file.

use crate::error::{Error, Result};
use crate::types::{MergeMethod, RepositoryRef};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw pull request action settings, as written in the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
#[allow(clippy::struct_excessive_bools)]
pub struct ActionSpec {
    /// Enable auto-merge on the pull request
    pub auto_merge: bool,
    /// Pull request title, overrides the report title when set
    pub title: String,
    /// Description template placed above the report
    pub description: String,
    /// Labels to attach. Labels must already exist on the repository
    pub labels: Vec<String>,
    /// Open the pull request as a draft
    pub draft: bool,
    /// Forbid maintainers from pushing to the head branch
    pub maintainer_cannot_modify: bool,
    /// "merge", "squash", "rebase", or empty
    pub merge_method: String,
    /// Use the PR title as merge commit headline (squash and rebase only)
    pub use_title_for_auto_merge: bool,
    /// Open the pull request against the parent of a fork
    pub parent: bool,
}

/// Validated pull request action configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ActionConfig {
    /// Enable auto-merge on the pull request
    pub auto_merge: bool,
    /// Pull request title override (empty = use report title)
    pub title: String,
    /// Description template
    pub description: String,
    /// Desired label names
    pub labels: Vec<String>,
    /// Open as draft
    pub draft: bool,
    /// Allow maintainers to push to the head branch
    pub maintainer_can_modify: bool,
    /// Merge method for auto-merge, `None` lets the platform decide
    pub merge_method: Option<MergeMethod>,
    /// Use the PR title as merge commit headline
    pub use_title_for_auto_merge: bool,
    /// Target the parent of a fork
    pub parent: bool,
}

impl TryFrom<ActionSpec> for ActionConfig {
    type Error = Error;

    fn try_from(spec: ActionSpec) -> Result<Self> {
        let merge_method = MergeMethod::parse_optional(&spec.merge_method)?;

        Ok(Self {
            auto_merge: spec.auto_merge,
            title: spec.title,
            description: spec.description,
            labels: spec.labels,
            draft: spec.draft,
            maintainer_can_modify: !spec.maintainer_cannot_modify,
            merge_method,
            use_title_for_auto_merge: spec.use_title_for_auto_merge,
            parent: spec.parent,
        })
    }
}

/// Branch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSettings {
    /// Target branch the pull request is opened against
    pub target: String,
    /// Pipeline id used to derive a dedicated working branch
    #[serde(default)]
    pub pipeline_id: Option<String>,
    /// Prefix for the derived working branch
    #[serde(default = "default_branch_prefix")]
    pub prefix: String,
}

fn default_branch_prefix() -> String {
    "prsync".to_string()
}

/// Contents of a `prsync` settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Repository the tool operates on
    pub repository: RepositoryRef,
    /// Custom GitHub Enterprise host (None for github.com)
    #[serde(default)]
    pub host: Option<String>,
    /// Branch settings
    pub branches: BranchSettings,
    /// Pull request action settings
    #[serde(default)]
    pub action: ActionSpec,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse settings: {e}")))
    }
}

/// Load settings from disk.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    Settings::from_toml(&content).map_err(|e| match e {
        Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
        other => other,
    })
}
