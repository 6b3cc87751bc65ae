//! Pull request state reader

use crate::error::Result;
use crate::graphql::{self, OpenPullRequestsData, OpenPullRequestsVars};
use crate::platform::GraphApiClient;
use crate::render::BodyRenderer;
use crate::types::PullRequestRecord;
use tracing::{debug, info};

/// Find the open pull request for a base/head branch pair.
///
/// Returns [`PullRequestRecord::default`] (empty id) when there is none. If
/// several exist, the most recent one wins.
pub async fn find_open_pull_request(
    client: &dyn GraphApiClient,
    owner: &str,
    name: &str,
    base: &str,
    head: &str,
) -> Result<PullRequestRecord> {
    debug!(owner, name, base, head, "finding open pull request");
    let vars = OpenPullRequestsVars {
        owner,
        name,
        base_ref_name: base,
        head_ref_name: head,
    };
    let data: OpenPullRequestsData =
        graphql::query(client, &graphql::OPEN_PULL_REQUESTS, &vars).await?;

    let found = data
        .repository
        .and_then(|r| r.pull_requests.nodes.into_iter().last());

    match found {
        Some(pr) => {
            let record = PullRequestRecord::from(pr);
            info!(url = %record.url, "existing pull request found");
            Ok(record)
        }
        None => {
            debug!(owner, name, "no existing pull request found");
            Ok(PullRequestRecord::default())
        }
    }
}

/// Report text for this run.
///
/// Merges the new report into the body of an existing pull request unless a
/// reset is requested or no pull request exists yet.
pub fn merge_body(
    renderer: &dyn BodyRenderer,
    existing: &PullRequestRecord,
    report: &str,
    reset: bool,
) -> String {
    if reset || !existing.exists() {
        debug!("using new report as pull request body");
        return report.to_string();
    }
    debug!(number = existing.number, "merging existing pull request body with new report");
    renderer.merge(&existing.body, report)
}
