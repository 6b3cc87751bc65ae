//! Error types for prsync

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the reconciliation engine and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid action configuration, raised before any remote call
    #[error("invalid configuration: {0}")]
    Validation(String),

    /// Any remote query or mutation failure
    #[error("GitHub API error: {0}")]
    Transport(String),

    /// Repository (or its fork parent) could not be resolved
    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    /// The repository settings do not allow auto-merge
    #[error("auto-merge is not allowed on repository {0}")]
    AutoMergeNotAllowed(String),

    /// Auto-merge was rejected because the pull request is already mergeable
    /// and no branch protection gate exists
    #[error("pull request is in clean status: {0}")]
    CleanStatusAutoMerge(String),

    /// Config file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
