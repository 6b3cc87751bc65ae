//! Core types for prsync

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Owner and name of the repository the tool is pointed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepositoryRef {
    /// Create a new repository reference
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Relationship between the working branch and the branch it was cut from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BranchStatus {
    /// Working branch has commits the target does not
    Ahead,
    /// Target has commits the working branch does not
    Behind,
    /// Both sides have unique commits
    Diverged,
    /// Both branches point at the same history
    Identical,
    /// No comparison was requested, or the ref could not be compared
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ahead => write!(f, "ahead"),
            Self::Behind => write!(f, "behind"),
            Self::Diverged => write!(f, "diverged"),
            Self::Identical => write!(f, "identical"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Identity of a remote repository, resolved once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryDescriptor {
    /// GraphQL node ID
    pub id: String,
    /// Repository owner login
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Parent node ID (only set when targeting the parent of a fork)
    pub parent_id: Option<String>,
    /// Parent owner login
    pub parent_owner: Option<String>,
    /// Parent repository name
    pub parent_name: Option<String>,
    /// Working branch status relative to the source branch
    pub status: BranchStatus,
}

impl RepositoryDescriptor {
    /// Whether the working branch has something to propose
    pub fn is_ahead(&self) -> bool {
        self.status == BranchStatus::Ahead
    }

    /// Owner and name that pull request and label lookups must address.
    ///
    /// When `parent` is requested and the parent identity was resolved, the
    /// parent is returned; otherwise the repository itself.
    pub fn lookup_target(&self, parent: bool) -> (&str, &str) {
        match (parent, &self.parent_owner, &self.parent_name) {
            (true, Some(owner), Some(name)) => (owner, name),
            _ => (&self.owner, &self.name),
        }
    }
}

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrState {
    /// PR is open
    #[default]
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// Snapshot of a remote pull request
///
/// The default value (empty `id`) stands for "no pull request exists yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    /// GraphQL node ID, empty when the PR does not exist
    pub id: String,
    /// PR number
    pub number: u64,
    /// Current state
    pub state: PrState,
    /// PR title
    pub title: String,
    /// PR body
    pub body: String,
    /// Base branch name
    pub base_branch: String,
    /// Head branch name
    pub head_branch: String,
    /// Number of files changed between base and head
    pub changed_file_count: u64,
    /// Web URL for the PR
    pub url: String,
}

impl PullRequestRecord {
    /// Whether this record refers to an existing pull request
    pub const fn exists(&self) -> bool {
        !self.id.is_empty()
    }

    /// Whether the branch has no effective diff against its base
    pub const fn has_no_changes(&self) -> bool {
        self.changed_file_count == 0
    }
}

/// A repository label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// GraphQL node ID
    pub id: String,
    /// Label name
    pub name: String,
    /// Label description
    #[serde(default)]
    pub description: Option<String>,
}

/// Merge strategy used when auto-merge kicks in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMethod {
    /// Squash all commits into one
    Squash,
    /// Create a merge commit
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl MergeMethod {
    /// Parse an optional merge method, where the empty string means "unset"
    pub fn parse_optional(value: &str) -> Result<Option<Self>> {
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }

    /// Enum value expected by the GraphQL API
    pub const fn as_graphql(self) -> &'static str {
        match self {
            Self::Squash => "SQUASH",
            Self::Merge => "MERGE",
            Self::Rebase => "REBASE",
        }
    }
}

impl FromStr for MergeMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "squash" => Ok(Self::Squash),
            "merge" => Ok(Self::Merge),
            "rebase" => Ok(Self::Rebase),
            other => Err(Error::Validation(format!(
                "wrong merge method {other:?}, accepting one of 'squash', 'merge', 'rebase', or ''"
            ))),
        }
    }
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// Source, working and target branch names for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSet {
    /// Branch the working branch was cut from
    pub source: String,
    /// Branch holding the generated changes (PR head)
    pub working: String,
    /// Branch the PR is opened against (PR base)
    pub target: String,
}

/// Report produced by the pipeline for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionReport {
    /// Fallback PR title when the configuration does not set one
    pub title: String,
    /// Rendered report text for this run
    pub report: String,
}

impl ActionReport {
    /// Create a new report
    pub fn new(title: impl Into<String>, report: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            report: report.into(),
        }
    }
}

/// Final state reached by a reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileState {
    /// No pull request exists and none was created
    NoPullRequest,
    /// A pull request was created and updated, nothing further to do
    Created,
    /// An existing pull request was updated, nothing further to do
    Updated,
    /// Auto-merge was enabled on the pull request
    AutoMergeRequested,
    /// The pull request was closed because it has no changes
    Closed,
    /// A pull request exists and needs no action
    Idle,
}

impl std::fmt::Display for ReconcileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPullRequest => write!(f, "no pull request"),
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::AutoMergeRequested => write!(f, "auto-merge requested"),
            Self::Closed => write!(f, "closed"),
            Self::Idle => write!(f, "idle"),
        }
    }
}
