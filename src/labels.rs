//! Label synchronization
//!
//! Labels are only ever added: anything already attached to the pull request
//! stays attached, whether or not it is in the desired set.

use crate::error::{Error, Result};
use crate::graphql::{
    self, OwnerNameVars, PullRequestLabelsData, PullRequestLabelsVars, RepositoryLabelsData,
};
use crate::platform::GraphApiClient;
use crate::types::Label;
use std::collections::HashSet;
use tracing::debug;

/// Number of labels requested per page when listing pull request labels
pub const LABEL_PAGE_SIZE: u32 = 20;

/// List the label catalog of a repository
pub async fn list_repository_labels(
    client: &dyn GraphApiClient,
    owner: &str,
    name: &str,
) -> Result<Vec<Label>> {
    debug!(owner, name, "listing repository labels");
    let data: RepositoryLabelsData =
        graphql::query(client, &graphql::REPOSITORY_LABELS, &OwnerNameVars { owner, name }).await?;

    let labels = data
        .repository
        .ok_or_else(|| Error::RepositoryNotFound(format!("{owner}/{name}")))?
        .labels
        .nodes;
    debug!(count = labels.len(), "listed repository labels");
    Ok(labels)
}

/// Pages of labels attached to a pull request, newest page first
///
/// Each call to [`next_page`](Self::next_page) requests the page before the
/// previous one, until the platform reports there is none.
pub struct LabelPages<'a> {
    client: &'a dyn GraphApiClient,
    owner: &'a str,
    name: &'a str,
    number: u64,
    before: Option<String>,
    exhausted: bool,
}

impl<'a> LabelPages<'a> {
    /// Start paging from the most recent labels
    pub const fn new(
        client: &'a dyn GraphApiClient,
        owner: &'a str,
        name: &'a str,
        number: u64,
    ) -> Self {
        Self {
            client,
            owner,
            name,
            number,
            before: None,
            exhausted: false,
        }
    }

    /// Fetch the next page, or `None` once all pages were returned
    pub async fn next_page(&mut self) -> Result<Option<Vec<Label>>> {
        if self.exhausted {
            return Ok(None);
        }

        let vars = PullRequestLabelsVars {
            owner: self.owner,
            name: self.name,
            number: self.number,
            page_size: LABEL_PAGE_SIZE,
            before: self.before.as_deref(),
        };
        let data: PullRequestLabelsData =
            graphql::query(self.client, &graphql::PULL_REQUEST_LABELS, &vars).await?;

        if let Some(rate) = &data.rate_limit {
            debug!(
                cost = rate.cost,
                remaining = rate.remaining,
                reset_at = %rate.reset_at,
                "GraphQL rate limit"
            );
        }

        let page = data
            .repository
            .and_then(|r| r.pull_request)
            .ok_or_else(|| {
                Error::Transport(format!(
                    "pull request #{} not found in {}/{}",
                    self.number, self.owner, self.name
                ))
            })?
            .labels;

        match page.page_info.start_cursor {
            Some(cursor) if page.page_info.has_previous_page => self.before = Some(cursor),
            _ => self.exhausted = true,
        }

        Ok(Some(page.nodes))
    }
}

/// List every label attached to a pull request.
///
/// All pages are collected before returning; a failure on any page fails
/// the whole listing.
pub async fn list_pull_request_labels(
    client: &dyn GraphApiClient,
    owner: &str,
    name: &str,
    number: u64,
) -> Result<Vec<Label>> {
    debug!(owner, name, number, "listing pull request labels");
    let mut pages = LabelPages::new(client, owner, name, number);
    let mut seen = HashSet::new();
    let mut labels = Vec::new();

    while let Some(page) = pages.next_page().await? {
        for label in page {
            if seen.insert(label.id.clone()) {
                labels.push(label);
            }
        }
    }

    debug!(number, count = labels.len(), "listed pull request labels");
    Ok(labels)
}

/// Labels to set on the pull request.
///
/// The union of catalog labels matching a desired name and the labels
/// already attached. Desired names missing from the catalog are dropped.
pub fn compute_desired_label_set(
    desired: &[String],
    catalog: &[Label],
    attached: &[Label],
) -> Vec<Label> {
    let mut seen = HashSet::new();
    let matching = catalog
        .iter()
        .filter(|label| desired.iter().any(|name| *name == label.name));

    for name in desired {
        if !catalog.iter().any(|label| label.name == *name) {
            debug!(label = %name, "label does not exist on repository, skipping");
        }
    }

    attached
        .iter()
        .chain(matching)
        .filter(|label| seen.insert(label.id.as_str()))
        .cloned()
        .collect()
}
