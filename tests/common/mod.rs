//! Shared fixtures for prsync tests

#![allow(dead_code)]

mod fake_client;

pub use fake_client::{Call, FakeGraphClient};

use prsync::config::ActionSpec;
use prsync::render::{BodyRenderer, MarkdownRenderer};
use prsync::types::RepositoryRef;
use prsync::vcs::PipelineBranches;
use serde_json::{Value, json};

pub const OWNER: &str = "acme";
pub const REPO: &str = "charts";
pub const WORKING: &str = "prsync_main_bump";

pub fn repository_ref() -> RepositoryRef {
    RepositoryRef::new(OWNER, REPO)
}

/// Branches: main -> prsync_main_bump
pub fn branches() -> PipelineBranches {
    PipelineBranches::new("main", Some("bump".to_string()), "prsync")
}

pub fn spec() -> ActionSpec {
    ActionSpec {
        title: "Bump x to 2.0".to_string(),
        ..ActionSpec::default()
    }
}

/// `Repository`/`RepositoryWithComparison` data for a non-fork repository
pub fn repository_data(status: &str) -> Value {
    json!({
        "repository": {
            "id": "R_acme",
            "name": REPO,
            "owner": { "login": OWNER },
            "parent": null,
            "ref": { "compare": { "status": status, "aheadBy": 1, "behindBy": 0 } }
        }
    })
}

/// Repository data for a fork of `upstream/charts`
pub fn fork_repository_data(status: &str) -> Value {
    json!({
        "repository": {
            "id": "R_fork",
            "name": REPO,
            "owner": { "login": OWNER },
            "parent": { "id": "R_upstream", "name": REPO, "owner": { "login": "upstream" } },
            "ref": { "compare": { "status": status, "aheadBy": 1, "behindBy": 0 } }
        }
    })
}

pub fn pr_node(number: u64, changed_files: u64, body: &str) -> Value {
    json!({
        "id": format!("PR_{number}"),
        "number": number,
        "state": "OPEN",
        "title": "Bump x to 2.0",
        "body": body,
        "baseRefName": "main",
        "headRefName": WORKING,
        "changedFiles": changed_files,
        "url": format!("https://github.com/acme/charts/pull/{number}")
    })
}

pub fn open_pull_requests(nodes: Vec<Value>) -> Value {
    json!({ "repository": { "pullRequests": { "nodes": nodes } } })
}

/// Payload for a mutation returning `{ pullRequest }` under `field`
pub fn pr_payload(field: &str, node: Value) -> Value {
    json!({ field: { "pullRequest": node } })
}

pub fn label_node(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "description": null })
}

pub fn repository_labels(labels: Vec<Value>) -> Value {
    json!({ "repository": { "labels": { "nodes": labels } } })
}

pub fn pull_request_labels_page(labels: Vec<Value>, previous_cursor: Option<&str>) -> Value {
    json!({
        "rateLimit": { "cost": 1, "remaining": 4999, "resetAt": "2026-10-15T12:00:00Z" },
        "repository": {
            "pullRequest": {
                "labels": {
                    "pageInfo": {
                        "hasPreviousPage": previous_cursor.is_some(),
                        "startCursor": previous_cursor
                    },
                    "nodes": labels
                }
            }
        }
    })
}

pub fn auto_merge_allowed(allowed: bool) -> Value {
    json!({ "repository": { "autoMergeAllowed": allowed } })
}

pub fn comment_added() -> Value {
    json!({ "addComment": { "clientMutationId": null } })
}

pub fn auto_merge_enabled(number: u64) -> Value {
    json!({
        "enablePullRequestAutoMerge": {
            "pullRequest": {
                "id": format!("PR_{number}"),
                "number": number,
                "url": format!("https://github.com/acme/charts/pull/{number}")
            }
        }
    })
}

/// Body the default renderer produces for a report without template
pub fn rendered_body(report: &str) -> String {
    MarkdownRenderer.generate("", report)
}

/// Fake with an existing open PR #7 on an ahead branch, all mutations wired
pub fn fake_with_existing_pr(changed_files: u64) -> FakeGraphClient {
    let fake = FakeGraphClient::new();
    let node = pr_node(7, changed_files, &rendered_body("* x 1.0 -> 2.0"));
    fake.set_response("RepositoryWithComparison", repository_data("AHEAD"));
    fake.set_response("Repository", repository_data("AHEAD"));
    fake.set_response("OpenPullRequests", open_pull_requests(vec![node.clone()]));
    fake.set_response("UpdatePullRequest", pr_payload("updatePullRequest", node.clone()));
    fake.set_response("ClosePullRequest", pr_payload("closePullRequest", node));
    fake.set_response("AddComment", comment_added());
    fake.set_response("AutoMergeAllowed", auto_merge_allowed(true));
    fake.set_response("EnablePullRequestAutoMerge", auto_merge_enabled(7));
    fake
}
