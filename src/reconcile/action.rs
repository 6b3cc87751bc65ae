//! Reconciliation entry points
//!
//! `create_action` converges the remote pull request toward the
//! configuration and report; `clean_action` only closes a pull request that
//! no longer carries any change.

use crate::config::{ActionConfig, ActionSpec};
use crate::error::{Error, Result};
use crate::labels::{compute_desired_label_set, list_pull_request_labels, list_repository_labels};
use crate::platform::GraphApiClient;
use crate::reconcile::mutation::{self, CreateRequest};
use crate::reconcile::state::{find_open_pull_request, merge_body};
use crate::render::BodyRenderer;
use crate::repository::{Comparison, resolve_repository};
use crate::types::{
    ActionReport, PullRequestRecord, ReconcileState, RepositoryDescriptor, RepositoryRef,
};
use crate::vcs::VersionControl;
use tracing::{debug, error, info};

/// The automation pull request of one repository and branch pair
///
/// Collaborators are borrowed for the lifetime of the action; nothing is
/// cached between calls.
pub struct PullRequestAction<'a> {
    config: ActionConfig,
    repository: RepositoryRef,
    client: &'a dyn GraphApiClient,
    vcs: &'a dyn VersionControl,
    renderer: &'a dyn BodyRenderer,
}

impl<'a> PullRequestAction<'a> {
    /// Validate the action spec and bind it to its collaborators.
    ///
    /// Fails with [`Error::Validation`] on an invalid merge method, before
    /// any remote call is made.
    pub fn new(
        spec: ActionSpec,
        repository: RepositoryRef,
        client: &'a dyn GraphApiClient,
        vcs: &'a dyn VersionControl,
        renderer: &'a dyn BodyRenderer,
    ) -> Result<Self> {
        let config = ActionConfig::try_from(spec)?;
        Ok(Self {
            config,
            repository,
            client,
            vcs,
            renderer,
        })
    }

    /// Close the pull request if its branch no longer carries any change.
    pub async fn clean_action(&self, _report: &ActionReport) -> Result<ReconcileState> {
        let branches = self.vcs.branches();
        let repository = resolve_repository(
            self.client,
            &self.repository.owner,
            &self.repository.name,
            None,
            self.config.parent,
        )
        .await?;

        let existing = self.find_existing(&repository, &branches.target, &branches.working).await?;

        if !existing.exists() {
            debug!("nothing to clean");
            return Ok(ReconcileState::NoPullRequest);
        }

        if existing.has_no_changes() {
            debug!(url = %existing.url, "no changed file detected in pull request");
            mutation::close(self.client, &existing.id).await?;
            return Ok(ReconcileState::Closed);
        }

        Ok(ReconcileState::Idle)
    }

    /// Create or update the pull request for this report.
    ///
    /// With `reset_description`, the body is rebuilt from this report alone
    /// instead of accumulating previous reports.
    pub async fn create_action(
        &self,
        report: &ActionReport,
        reset_description: bool,
    ) -> Result<ReconcileState> {
        let title = if self.config.title.is_empty() {
            report.title.as_str()
        } else {
            self.config.title.as_str()
        };

        let branches = self.vcs.branches();
        let repository = resolve_repository(
            self.client,
            &self.repository.owner,
            &self.repository.name,
            Some(Comparison {
                base: &branches.source,
                head: &branches.working,
            }),
            self.config.parent,
        )
        .await?;

        let mut pull_request = self
            .find_existing(&repository, &branches.target, &branches.working)
            .await?;
        let report_text =
            merge_body(self.renderer, &pull_request, &report.report, reset_description);
        let body = self.renderer.generate(&self.config.description, &report_text);

        let mut state = ReconcileState::Updated;
        if !pull_request.exists() {
            let request = CreateRequest {
                repository: &repository,
                parent: self.config.parent,
                base: &branches.target,
                head: &branches.working,
                title,
                body: &body,
                draft: self.config.draft,
                maintainer_can_modify: self.config.maintainer_can_modify,
            };
            match mutation::create(self.client, &request).await? {
                Some(created) => {
                    pull_request = created;
                    state = ReconcileState::Created;
                }
                None => {
                    debug!(
                        working = %branches.working,
                        status = %repository.status,
                        source = %branches.source,
                        "no pull request to update"
                    );
                    return Ok(ReconcileState::NoPullRequest);
                }
            }
        }

        // Runs right after creation too: labels need an existing pull request
        pull_request = self.update(&repository, &pull_request, title, &body).await?;

        debug!(
            working = %branches.working,
            status = %repository.status,
            source = %branches.source,
            "checked branch status"
        );
        if !repository.is_ahead() {
            debug!("pull request not needed");
            return Ok(state);
        }

        if pull_request.has_no_changes() {
            debug!(url = %pull_request.url, "no changed file detected in pull request");
            mutation::close(self.client, &pull_request.id).await?;
            return Ok(ReconcileState::Closed);
        }

        if self.config.auto_merge {
            self.enable_auto_merge(&repository, &pull_request, title).await?;
            return Ok(ReconcileState::AutoMergeRequested);
        }

        Ok(state)
    }

    async fn find_existing(
        &self,
        repository: &RepositoryDescriptor,
        base: &str,
        head: &str,
    ) -> Result<PullRequestRecord> {
        let (owner, name) = repository.lookup_target(self.config.parent);
        find_open_pull_request(self.client, owner, name, base, head).await
    }

    async fn update(
        &self,
        repository: &RepositoryDescriptor,
        pull_request: &PullRequestRecord,
        title: &str,
        body: &str,
    ) -> Result<PullRequestRecord> {
        let (owner, name) = repository.lookup_target(self.config.parent);

        let label_ids = if self.config.labels.is_empty() {
            None
        } else {
            let catalog = list_repository_labels(self.client, owner, name).await?;
            let attached =
                list_pull_request_labels(self.client, owner, name, pull_request.number).await?;
            let labels = compute_desired_label_set(&self.config.labels, &catalog, &attached);
            Some(labels.into_iter().map(|l| l.id).collect())
        };

        mutation::update(self.client, &pull_request.id, title, body, label_ids).await
    }

    async fn enable_auto_merge(
        &self,
        repository: &RepositoryDescriptor,
        pull_request: &PullRequestRecord,
        title: &str,
    ) -> Result<()> {
        let (owner, name) = repository.lookup_target(self.config.parent);
        let headline = mutation::auto_merge_headline(
            self.config.merge_method,
            self.config.use_title_for_auto_merge,
            title,
            pull_request.number,
        );

        let result = mutation::enable_auto_merge(
            self.client,
            owner,
            name,
            &pull_request.id,
            self.config.merge_method,
            headline,
        )
        .await;

        match &result {
            Err(Error::AutoMergeNotAllowed(_)) => {
                error!("Auto-merge can't be enabled. Make sure to allow it on the repository.");
            }
            Err(Error::CleanStatusAutoMerge(_)) => {
                error!(
                    "Auto-merge can't be enabled. Make sure to have branch protection rules enabled on the repository."
                );
            }
            Err(e) => debug!(error = %e, "error enabling auto-merge"),
            Ok(()) => info!(url = %pull_request.url, "auto-merge requested"),
        }

        result
    }
}
