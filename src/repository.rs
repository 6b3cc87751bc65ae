//! Repository resolution
//!
//! Resolves the identity of the repository (and, for fork parent targeting,
//! its parent) together with the status of the working branch.

use crate::error::{Error, Result};
use crate::graphql::{self, RepositoryData, RepositoryVars};
use crate::platform::GraphApiClient;
use crate::types::{BranchStatus, RepositoryDescriptor};
use tracing::debug;

/// Branches to compare: the working branch (`head`) against `base`
#[derive(Debug, Clone, Copy)]
pub struct Comparison<'a> {
    /// Branch the working branch was cut from
    pub base: &'a str,
    /// Working branch
    pub head: &'a str,
}

/// Resolve a repository descriptor.
///
/// When `compare` is `None`, the status is [`BranchStatus::Unknown`]. When
/// `parent` is set and the repository is not a fork, resolution fails: there
/// is no fallback to the fork itself.
pub async fn resolve_repository(
    client: &dyn GraphApiClient,
    owner: &str,
    name: &str,
    compare: Option<Comparison<'_>>,
    parent: bool,
) -> Result<RepositoryDescriptor> {
    debug!(owner, name, parent, "resolving repository");

    let (op, vars) = match compare {
        Some(c) => (
            &graphql::REPOSITORY_WITH_COMPARISON,
            RepositoryVars {
                owner,
                name,
                base_ref: Some(c.base),
                head_ref: Some(c.head),
            },
        ),
        None => (
            &graphql::REPOSITORY,
            RepositoryVars {
                owner,
                name,
                base_ref: None,
                head_ref: None,
            },
        ),
    };

    let data: RepositoryData = graphql::query(client, op, &vars).await?;
    let node = data
        .repository
        .ok_or_else(|| Error::RepositoryNotFound(format!("{owner}/{name}")))?;

    let status = match node.git_ref.and_then(|r| r.compare) {
        Some(comparison) => {
            debug!(
                status = %comparison.status,
                ahead_by = comparison.ahead_by,
                behind_by = comparison.behind_by,
                "compared branches"
            );
            comparison.status
        }
        None => BranchStatus::Unknown,
    };

    let mut descriptor = RepositoryDescriptor {
        id: node.id,
        owner: node.owner.login,
        name: node.name,
        status,
        ..RepositoryDescriptor::default()
    };

    if parent {
        let upstream = node.parent.ok_or_else(|| {
            Error::RepositoryNotFound(format!(
                "{owner}/{name} is not a fork, cannot target its parent"
            ))
        })?;
        debug!(
            parent_owner = %upstream.owner.login,
            parent_name = %upstream.name,
            "resolved fork parent"
        );
        descriptor.parent_id = Some(upstream.id);
        descriptor.parent_owner = Some(upstream.owner.login);
        descriptor.parent_name = Some(upstream.name);
    }

    Ok(descriptor)
}
