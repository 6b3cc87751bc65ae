//! Platform transport for the GitHub GraphQL API
//!
//! The reconciliation engine never talks HTTP itself: every query and
//! mutation goes through a [`GraphApiClient`] handed to it by the caller.

mod github;

pub use github::GitHubGraphClient;

use crate::error::Result;
use crate::graphql::Operation;
use async_trait::async_trait;
use serde_json::Value;

/// Transport capability for GraphQL queries and mutations
///
/// Implementations return the `data` object of the response. GraphQL errors,
/// HTTP failures and authentication problems are all reported as
/// [`Error::Transport`](crate::error::Error::Transport). Retries and
/// timeouts, if any, belong to the implementation.
#[async_trait]
pub trait GraphApiClient: Send + Sync {
    /// Execute a query with the given variables
    async fn query(&self, operation: &Operation, variables: Value) -> Result<Value>;

    /// Execute a mutation. `input` is sent as the `$input` variable.
    async fn mutate(&self, operation: &Operation, input: Value) -> Result<Value>;
}
