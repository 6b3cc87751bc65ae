//! prsync: keep a single automation pull request in sync with a report
//!
//! Given a working branch that already holds generated changes, prsync makes
//! sure exactly one pull request exists against the target branch, keeps its
//! title, body and labels up to date, optionally enables auto-merge, and
//! closes it again once the branch has no effective diff.
//!
//! The entry points are [`reconcile::PullRequestAction::create_action`] and
//! [`reconcile::PullRequestAction::clean_action`]. Remote access goes through
//! a [`platform::GraphApiClient`] passed in by the caller.

pub mod config;
pub mod error;
pub mod graphql;
pub mod labels;
pub mod platform;
pub mod reconcile;
pub mod render;
pub mod repository;
pub mod types;
pub mod vcs;
