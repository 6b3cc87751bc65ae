//! Pull request reconciliation engine
//!
//! Three layers, leaves first:
//! 1. State - read the existing pull request and merge its body
//! 2. Mutation - create, update, close and enable auto-merge
//! 3. Action - the `clean_action` / `create_action` state machine

mod action;
mod mutation;
mod state;

pub use action::PullRequestAction;
pub use mutation::{
    CLOSE_COMMENT, CreateRequest, add_comment, auto_merge_headline, close, create,
    enable_auto_merge, is_auto_merge_allowed, update,
};
pub use state::{find_open_pull_request, merge_body};
