//! Mutation executor
//!
//! Every write the engine performs goes through here. Platform rejections
//! that callers need to act on are translated into dedicated error variants.

use crate::error::{Error, Result};
use crate::graphql::{
    self, AddCommentInput, AutoMergeAllowedData, ClosePullRequestData, CreatePullRequestData,
    CreatePullRequestInput, EnableAutoMergeInput, OwnerNameVars, PullRequestIdInput,
    UpdatePullRequestData, UpdatePullRequestInput,
};
use crate::platform::GraphApiClient;
use crate::types::{MergeMethod, PullRequestRecord, RepositoryDescriptor};
use serde_json::Value;
use tracing::{debug, error, info};

/// Comment left on a pull request closed for having no changes
pub const CLOSE_COMMENT: &str = "Pull request closed as no changed file detected";

/// Parameters for opening a pull request
#[derive(Debug, Clone)]
pub struct CreateRequest<'a> {
    /// Resolved repository (the fork when `parent` is set)
    pub repository: &'a RepositoryDescriptor,
    /// Open the pull request against the fork's parent
    pub parent: bool,
    /// Base branch
    pub base: &'a str,
    /// Head branch
    pub head: &'a str,
    /// Title
    pub title: &'a str,
    /// Body
    pub body: &'a str,
    /// Open as draft
    pub draft: bool,
    /// Allow maintainers to push to the head branch
    pub maintainer_can_modify: bool,
}

/// Open a pull request.
///
/// Returns `Ok(None)` without calling the API unless the head branch is
/// ahead of its base.
pub async fn create(
    client: &dyn GraphApiClient,
    request: &CreateRequest<'_>,
) -> Result<Option<PullRequestRecord>> {
    let repository = request.repository;
    if !repository.is_ahead() {
        debug!(status = %repository.status, "pull request not needed");
        return Ok(None);
    }

    let (repository_id, head_repository_id) = if request.parent {
        let parent_id = repository.parent_id.clone().ok_or_else(|| {
            Error::RepositoryNotFound(format!(
                "{}/{} has no resolved parent",
                repository.owner, repository.name
            ))
        })?;
        (parent_id, Some(repository.id.clone()))
    } else {
        (repository.id.clone(), None)
    };

    let input = CreatePullRequestInput {
        repository_id,
        base_ref_name: request.base.to_string(),
        head_ref_name: request.head.to_string(),
        head_repository_id,
        title: request.title.to_string(),
        body: request.body.to_string(),
        maintainer_can_modify: request.maintainer_can_modify,
        draft: request.draft,
    };

    debug!(
        base = request.base,
        head = request.head,
        draft = request.draft,
        "creating pull request"
    );
    let data: CreatePullRequestData =
        graphql::mutate(client, &graphql::CREATE_PULL_REQUEST, &input).await?;

    let record = PullRequestRecord::from(data.create_pull_request.pull_request);
    info!(number = record.number, url = %record.url, "created pull request");
    Ok(Some(record))
}

/// Update title, body and optionally labels of a pull request.
///
/// `label_ids` of `None` leaves the labels untouched, `Some(vec![])` would
/// remove all of them.
pub async fn update(
    client: &dyn GraphApiClient,
    pr_id: &str,
    title: &str,
    body: &str,
    label_ids: Option<Vec<String>>,
) -> Result<PullRequestRecord> {
    debug!(pr_id, labels = ?label_ids, "updating pull request");
    let input = UpdatePullRequestInput {
        pull_request_id: pr_id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        label_ids,
    };

    let data: UpdatePullRequestData =
        graphql::mutate(client, &graphql::UPDATE_PULL_REQUEST, &input).await?;

    let record = PullRequestRecord::from(data.update_pull_request.pull_request);
    info!(url = %record.url, "pull request available");
    Ok(record)
}

/// Close a pull request and leave a comment explaining why.
///
/// The comment is best effort: a failure is logged and the close still
/// counts as successful.
pub async fn close(client: &dyn GraphApiClient, pr_id: &str) -> Result<PullRequestRecord> {
    debug!(pr_id, "closing pull request");
    let input = PullRequestIdInput {
        pull_request_id: pr_id.to_string(),
    };

    let data: ClosePullRequestData =
        graphql::mutate(client, &graphql::CLOSE_PULL_REQUEST, &input).await?;
    let record = PullRequestRecord::from(data.close_pull_request.pull_request);
    info!(url = %record.url, "pull request closed as no changed file detected");

    if let Err(e) = add_comment(client, pr_id, CLOSE_COMMENT).await {
        error!(pr_id, error = %e, "failed to comment on closed pull request");
    }

    Ok(record)
}

/// Add a comment to a pull request
pub async fn add_comment(client: &dyn GraphApiClient, subject_id: &str, body: &str) -> Result<()> {
    debug!(subject_id, "adding comment");
    let input = AddCommentInput {
        subject_id: subject_id.to_string(),
        body: body.to_string(),
    };
    let _: Value = graphql::mutate(client, &graphql::ADD_COMMENT, &input).await?;
    Ok(())
}

/// Whether the repository settings allow auto-merge
pub async fn is_auto_merge_allowed(
    client: &dyn GraphApiClient,
    owner: &str,
    name: &str,
) -> Result<bool> {
    let data: AutoMergeAllowedData =
        graphql::query(client, &graphql::AUTO_MERGE_ALLOWED, &OwnerNameVars { owner, name }).await?;

    let allowed = data
        .repository
        .ok_or_else(|| Error::RepositoryNotFound(format!("{owner}/{name}")))?
        .auto_merge_allowed;
    debug!(owner, name, allowed, "checked auto-merge setting");
    Ok(allowed)
}

/// Merge commit headline to request when auto-merging.
///
/// Squash merges get `"<title> (#<number>)"`, rebase merges the bare title.
/// Plain merges keep the platform's default headline.
pub fn auto_merge_headline(
    method: Option<MergeMethod>,
    use_title: bool,
    title: &str,
    number: u64,
) -> Option<String> {
    if !use_title {
        return None;
    }
    match method {
        Some(MergeMethod::Squash) => Some(format!("{title} (#{number})")),
        Some(MergeMethod::Rebase) => Some(title.to_string()),
        Some(MergeMethod::Merge) | None => None,
    }
}

/// Enable auto-merge on a pull request.
///
/// Fails with [`Error::AutoMergeNotAllowed`] before attempting the mutation
/// if the repository does not allow it, and with
/// [`Error::CleanStatusAutoMerge`] when the platform refuses because the
/// pull request can already be merged directly.
pub async fn enable_auto_merge(
    client: &dyn GraphApiClient,
    owner: &str,
    name: &str,
    pr_id: &str,
    merge_method: Option<MergeMethod>,
    commit_headline: Option<String>,
) -> Result<()> {
    if !is_auto_merge_allowed(client, owner, name).await? {
        return Err(Error::AutoMergeNotAllowed(format!("{owner}/{name}")));
    }

    let input = EnableAutoMergeInput {
        pull_request_id: pr_id.to_string(),
        merge_method: merge_method.map(MergeMethod::as_graphql),
        commit_headline,
    };

    debug!(pr_id, method = ?merge_method, "enabling auto-merge");
    let result: Result<Value> = graphql::mutate(client, &graphql::ENABLE_AUTO_MERGE, &input).await;

    match result {
        Ok(_) => {
            info!(pr_id, "auto-merge enabled");
            Ok(())
        }
        Err(Error::Transport(msg)) if msg.to_ascii_lowercase().contains("clean status") => {
            Err(Error::CleanStatusAutoMerge(msg))
        }
        Err(e) => Err(e),
    }
}
