//! GraphQL operation descriptors and their typed variables/responses.
//!
//! Every remote call the engine makes has a fixed document, a fixed set of
//! variables and a fixed response shape. The documents are sent as-is by the
//! [`GraphApiClient`] implementation.

use crate::error::{Error, Result};
use crate::platform::GraphApiClient;
use crate::types::{BranchStatus, Label, PrState, PullRequestRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named GraphQL document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation name, also sent as `operationName`
    pub name: &'static str,
    /// Query or mutation document
    pub document: &'static str,
}

/// Run a query and decode its `data` payload
pub async fn query<V, R>(client: &dyn GraphApiClient, op: &Operation, variables: &V) -> Result<R>
where
    V: Serialize + Sync,
    R: DeserializeOwned,
{
    let variables = serde_json::to_value(variables)
        .map_err(|e| Error::Transport(format!("{}: failed to encode variables: {e}", op.name)))?;
    let data = client.query(op, variables).await?;
    decode(op, data)
}

/// Run a mutation and decode its `data` payload
pub async fn mutate<I, R>(client: &dyn GraphApiClient, op: &Operation, input: &I) -> Result<R>
where
    I: Serialize + Sync,
    R: DeserializeOwned,
{
    let input = serde_json::to_value(input)
        .map_err(|e| Error::Transport(format!("{}: failed to encode input: {e}", op.name)))?;
    let data = client.mutate(op, input).await?;
    decode(op, data)
}

fn decode<R: DeserializeOwned>(op: &Operation, data: Value) -> Result<R> {
    serde_json::from_value(data)
        .map_err(|e| Error::Transport(format!("{}: malformed response: {e}", op.name)))
}

// =============================================================================
// Shared fragments
// =============================================================================

/// Pull request fields selected by every operation returning a pull request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphQlPullRequest {
    pub id: String,
    pub number: u64,
    #[serde(default)]
    pub state: PrState,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub base_ref_name: String,
    #[serde(default)]
    pub head_ref_name: String,
    #[serde(default)]
    pub changed_files: u64,
    #[serde(default)]
    pub url: String,
}

impl From<GraphQlPullRequest> for PullRequestRecord {
    fn from(pr: GraphQlPullRequest) -> Self {
        Self {
            id: pr.id,
            number: pr.number,
            state: pr.state,
            title: pr.title,
            body: pr.body,
            base_branch: pr.base_ref_name,
            head_branch: pr.head_ref_name,
            changed_file_count: pr.changed_files,
            url: pr.url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RateLimit {
    pub cost: i64,
    pub remaining: i64,
    pub reset_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Owner {
    pub login: String,
}

// =============================================================================
// Repository
// =============================================================================

pub(crate) const REPOSITORY: Operation = Operation {
    name: "Repository",
    document: r"
        query Repository($owner: String!, $name: String!) {
            repository(owner: $owner, name: $name) {
                id
                name
                owner { login }
                parent { id name owner { login } }
            }
        }
    ",
};

pub(crate) const REPOSITORY_WITH_COMPARISON: Operation = Operation {
    name: "RepositoryWithComparison",
    document: r"
        query RepositoryWithComparison($owner: String!, $name: String!, $baseRef: String!, $headRef: String!) {
            repository(owner: $owner, name: $name) {
                id
                name
                owner { login }
                parent { id name owner { login } }
                ref(qualifiedName: $baseRef) {
                    compare(headRef: $headRef) {
                        status
                        aheadBy
                        behindBy
                    }
                }
            }
        }
    ",
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryVars<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_ref: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_ref: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryData {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryNode {
    pub id: String,
    pub name: String,
    pub owner: Owner,
    pub parent: Option<ParentNode>,
    #[serde(rename = "ref", default)]
    pub git_ref: Option<RefNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParentNode {
    pub id: String,
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefNode {
    pub compare: Option<Comparison>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Comparison {
    pub status: BranchStatus,
    #[serde(default)]
    pub ahead_by: u64,
    #[serde(default)]
    pub behind_by: u64,
}

pub(crate) const AUTO_MERGE_ALLOWED: Operation = Operation {
    name: "AutoMergeAllowed",
    document: r"
        query AutoMergeAllowed($owner: String!, $name: String!) {
            repository(owner: $owner, name: $name) {
                autoMergeAllowed
            }
        }
    ",
};

#[derive(Debug, Serialize)]
pub(crate) struct OwnerNameVars<'a> {
    pub owner: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AutoMergeAllowedData {
    pub repository: Option<AutoMergeAllowedNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AutoMergeAllowedNode {
    pub auto_merge_allowed: bool,
}

// =============================================================================
// Labels
// =============================================================================

pub(crate) const REPOSITORY_LABELS: Operation = Operation {
    name: "RepositoryLabels",
    document: r"
        query RepositoryLabels($owner: String!, $name: String!) {
            repository(owner: $owner, name: $name) {
                labels(first: 100) {
                    nodes { id name description }
                }
            }
        }
    ",
};

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryLabelsData {
    pub repository: Option<RepositoryLabelsNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryLabelsNode {
    pub labels: LabelNodes,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelNodes {
    #[serde(default)]
    pub nodes: Vec<Label>,
}

pub(crate) const PULL_REQUEST_LABELS: Operation = Operation {
    name: "PullRequestLabels",
    document: r"
        query PullRequestLabels($owner: String!, $name: String!, $number: Int!, $pageSize: Int!, $before: String) {
            rateLimit { cost remaining resetAt }
            repository(owner: $owner, name: $name) {
                pullRequest(number: $number) {
                    labels(last: $pageSize, before: $before) {
                        pageInfo { hasPreviousPage startCursor }
                        nodes { id name description }
                    }
                }
            }
        }
    ",
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestLabelsVars<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub number: u64,
    pub page_size: u32,
    pub before: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestLabelsData {
    pub rate_limit: Option<RateLimit>,
    pub repository: Option<PullRequestLabelsRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestLabelsRepository {
    pub pull_request: Option<PullRequestLabelsNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestLabelsNode {
    pub labels: LabelPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LabelPage {
    pub page_info: PageInfo,
    #[serde(default)]
    pub nodes: Vec<Label>,
}

// =============================================================================
// Pull requests
// =============================================================================

pub(crate) const OPEN_PULL_REQUESTS: Operation = Operation {
    name: "OpenPullRequests",
    document: r"
        query OpenPullRequests($owner: String!, $name: String!, $baseRefName: String!, $headRefName: String!) {
            repository(owner: $owner, name: $name) {
                pullRequests(baseRefName: $baseRefName, headRefName: $headRefName, last: 1, states: [OPEN]) {
                    nodes { id number state title body baseRefName headRefName changedFiles url }
                }
            }
        }
    ",
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OpenPullRequestsVars<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub base_ref_name: &'a str,
    pub head_ref_name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OpenPullRequestsData {
    pub repository: Option<OpenPullRequestsRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OpenPullRequestsRepository {
    pub pull_requests: PullRequestNodes,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestNodes {
    #[serde(default)]
    pub nodes: Vec<GraphQlPullRequest>,
}

pub(crate) const CREATE_PULL_REQUEST: Operation = Operation {
    name: "CreatePullRequest",
    document: r"
        mutation CreatePullRequest($input: CreatePullRequestInput!) {
            createPullRequest(input: $input) {
                pullRequest { id number state title body baseRefName headRefName changedFiles url }
            }
        }
    ",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePullRequestInput {
    pub repository_id: String,
    pub base_ref_name: String,
    pub head_ref_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_repository_id: Option<String>,
    pub title: String,
    pub body: String,
    pub maintainer_can_modify: bool,
    pub draft: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePullRequestData {
    pub create_pull_request: PullRequestPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestPayload {
    pub pull_request: GraphQlPullRequest,
}

pub(crate) const UPDATE_PULL_REQUEST: Operation = Operation {
    name: "UpdatePullRequest",
    document: r"
        mutation UpdatePullRequest($input: UpdatePullRequestInput!) {
            updatePullRequest(input: $input) {
                pullRequest { id number state title body baseRefName headRefName changedFiles url }
            }
        }
    ",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePullRequestInput {
    pub pull_request_id: String,
    pub title: String,
    pub body: String,
    /// Omitted keeps the current labels, an empty list would clear them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePullRequestData {
    pub update_pull_request: PullRequestPayload,
}

pub(crate) const CLOSE_PULL_REQUEST: Operation = Operation {
    name: "ClosePullRequest",
    document: r"
        mutation ClosePullRequest($input: ClosePullRequestInput!) {
            closePullRequest(input: $input) {
                pullRequest { id number state title body baseRefName headRefName changedFiles url }
            }
        }
    ",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestIdInput {
    pub pull_request_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClosePullRequestData {
    pub close_pull_request: PullRequestPayload,
}

pub(crate) const ADD_COMMENT: Operation = Operation {
    name: "AddComment",
    document: r"
        mutation AddComment($input: AddCommentInput!) {
            addComment(input: $input) {
                clientMutationId
            }
        }
    ",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCommentInput {
    pub subject_id: String,
    pub body: String,
}

pub(crate) const ENABLE_AUTO_MERGE: Operation = Operation {
    name: "EnablePullRequestAutoMerge",
    document: r"
        mutation EnablePullRequestAutoMerge($input: EnablePullRequestAutoMergeInput!) {
            enablePullRequestAutoMerge(input: $input) {
                pullRequest { id number url }
            }
        }
    ",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnableAutoMergeInput {
    pub pull_request_id: String,
    /// The API rejects an empty merge method, so it is only sent when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_headline: Option<String>,
}
