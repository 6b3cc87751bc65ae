//! GitHub GraphQL transport using octocrab

use crate::error::{Error, Result};
use crate::graphql::Operation;
use crate::platform::GraphApiClient;
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// GraphQL client for github.com or GitHub Enterprise
pub struct GitHubGraphClient {
    client: Octocrab,
}

impl GitHubGraphClient {
    /// Create a client authenticated with a personal access token
    ///
    /// `host` is the GitHub Enterprise host name, `None` for github.com.
    pub fn new(token: &str, host: Option<&str>) -> Result<Self> {
        match host {
            Some(h) => Self::with_base_uri(token, &format!("https://{h}/api")),
            None => {
                let client = Octocrab::builder()
                    .personal_token(token.to_string())
                    .build()?;
                Ok(Self { client })
            }
        }
    }

    /// Create a client against an explicit API base URI
    pub fn with_base_uri(token: &str, base_uri: &str) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(base_uri)?
            .build()?;
        Ok(Self { client })
    }

    async fn execute(&self, operation: &Operation, variables: Value) -> Result<Value> {
        debug!(operation = operation.name, "sending GraphQL request");

        let response: GraphQlResponse = self
            .client
            .graphql(&json!({
                "query": operation.document,
                "operationName": operation.name,
                "variables": variables,
            }))
            .await
            .map_err(|e| Error::Transport(format!("{} failed: {e}", operation.name)))?;

        into_data(operation, response)
    }
}

/// Turn a GraphQL response into its `data` payload.
///
/// `NOT_FOUND` errors come with partial data where the missing node is null;
/// that data is returned so callers can tell "missing" from "failed".
fn into_data(operation: &Operation, response: GraphQlResponse) -> Result<Value> {
    if let Some(errors) = response.errors
        && !errors.is_empty()
    {
        let only_not_found = errors
            .iter()
            .all(|e| e.kind.as_deref() == Some("NOT_FOUND"));

        if only_not_found && let Some(data) = response.data {
            debug!(operation = operation.name, "GraphQL response has missing nodes");
            return Ok(data);
        }

        let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
        return Err(Error::Transport(format!(
            "GraphQL error in {}: {}",
            operation.name,
            messages.join(", ")
        )));
    }

    response.data.ok_or_else(|| {
        Error::Transport(format!("No data in GraphQL response for {}", operation.name))
    })
}

#[async_trait]
impl GraphApiClient for GitHubGraphClient {
    async fn query(&self, operation: &Operation, variables: Value) -> Result<Value> {
        self.execute(operation, variables).await
    }

    async fn mutate(&self, operation: &Operation, input: Value) -> Result<Value> {
        self.execute(operation, json!({ "input": input })).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OP: Operation = Operation {
        name: "Probe",
        document: "query Probe { viewer { login } }",
    };

    fn response(value: Value) -> GraphQlResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_data_is_returned() {
        let data = into_data(&OP, response(json!({ "data": { "viewer": { "login": "bot" } } })))
            .unwrap();
        assert_eq!(data["viewer"]["login"], "bot");
    }

    #[test]
    fn test_errors_become_transport_errors() {
        let err = into_data(
            &OP,
            response(json!({
                "data": null,
                "errors": [{ "message": "Bad credentials" }, { "message": "try again" }]
            })),
        )
        .unwrap_err();

        match err {
            Error::Transport(msg) => {
                assert!(msg.contains("Bad credentials, try again"), "got: {msg}");
            }
            other => panic!("Expected Transport error, got: {other:?}"),
        }
    }

    #[test]
    fn test_not_found_keeps_partial_data() {
        let data = into_data(
            &OP,
            response(json!({
                "data": { "repository": null },
                "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a Repository" }]
            })),
        )
        .unwrap();
        assert!(data["repository"].is_null());
    }

    #[test]
    fn test_missing_data_is_an_error() {
        assert!(matches!(
            into_data(&OP, response(json!({}))),
            Err(Error::Transport(_))
        ));
    }
}
