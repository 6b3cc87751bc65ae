//! Fake GraphQL transport for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use prsync::error::{Error, Result};
use prsync::graphql::Operation;
use prsync::platform::GraphApiClient;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A recorded query or mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Operation name
    pub operation: String,
    /// Query variables, or the mutation input
    pub variables: Value,
}

/// Recording GraphQL client keyed by operation name
///
/// Features:
/// - Sticky responses per operation
/// - Queued responses per operation (consumed before the sticky one)
/// - Call tracking for verification
/// - Error injection for failure path testing
#[derive(Default)]
pub struct FakeGraphClient {
    sticky: Mutex<HashMap<String, Value>>,
    queued: Mutex<HashMap<String, VecDeque<Value>>>,
    errors: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeGraphClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to every call of `operation` with `data`
    pub fn set_response(&self, operation: &str, data: Value) {
        self.sticky
            .lock()
            .unwrap()
            .insert(operation.to_string(), data);
    }

    /// Respond to the next call of `operation` with `data`
    pub fn push_response(&self, operation: &str, data: Value) {
        self.queued
            .lock()
            .unwrap()
            .entry(operation.to_string())
            .or_default()
            .push_back(data);
    }

    /// Make every call of `operation` fail with a transport error
    pub fn fail(&self, operation: &str, msg: &str) {
        self.errors
            .lock()
            .unwrap()
            .insert(operation.to_string(), msg.to_string());
    }

    // === Call verification methods ===

    /// All recorded calls, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of all recorded operations, in order
    pub fn operations(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.operation).collect()
    }

    /// Variables (or input) of every call to `operation`
    pub fn calls_to(&self, operation: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation == operation)
            .map(|c| c.variables)
            .collect()
    }

    /// Number of calls to `operation`
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls_to(operation).len()
    }

    /// Assert that `operation` was never called
    pub fn assert_not_called(&self, operation: &str) {
        let calls = self.operations();
        assert!(
            !calls.iter().any(|c| c == operation),
            "Expected {operation} NOT to be called but got: {calls:?}"
        );
    }

    fn respond(&self, operation: &Operation, variables: Value) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            operation: operation.name.to_string(),
            variables,
        });

        if let Some(msg) = self.errors.lock().unwrap().get(operation.name) {
            return Err(Error::Transport(msg.clone()));
        }

        if let Some(data) = self
            .queued
            .lock()
            .unwrap()
            .get_mut(operation.name)
            .and_then(VecDeque::pop_front)
        {
            return Ok(data);
        }

        self.sticky
            .lock()
            .unwrap()
            .get(operation.name)
            .cloned()
            .ok_or_else(|| {
                Error::Transport(format!("{}: no response configured", operation.name))
            })
    }
}

#[async_trait]
impl GraphApiClient for FakeGraphClient {
    async fn query(&self, operation: &Operation, variables: Value) -> Result<Value> {
        self.respond(operation, variables)
    }

    async fn mutate(&self, operation: &Operation, input: Value) -> Result<Value> {
        self.respond(operation, input)
    }
}
