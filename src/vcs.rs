//! Branch naming for the automation pull request
//!
//! The engine only reads branch names from version control. Cloning,
//! committing and pushing happen before the engine runs.

use crate::types::BranchSet;
use regex::Regex;
use std::sync::LazyLock;

/// Characters git refuses in a ref name, plus whitespace
static INVALID_REF_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s~^:?*\[\\]+|\.{2,}|@\{").expect("valid regex"));

/// Version control capability consumed by the engine
pub trait VersionControl: Send + Sync {
    /// Source, working and target branch for this run
    fn branches(&self) -> BranchSet;
}

/// Replace characters that are not allowed in a git ref name.
///
/// Leading/trailing separators and a trailing `.lock` are stripped too.
pub fn sanitize_branch_name(name: &str) -> String {
    let replaced = INVALID_REF_CHARS.replace_all(name, "_");
    let trimmed = replaced.trim_matches(|c| c == '/' || c == '.' || c == '_');
    trimmed
        .strip_suffix(".lock")
        .unwrap_or(trimmed)
        .to_string()
}

/// Branches derived from a target branch and an optional pipeline id
///
/// Without a pipeline id, all three branches are the target branch. With
/// one, changes live on a dedicated `<prefix>_<target>_<pipeline>` branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineBranches {
    target: String,
    pipeline_id: Option<String>,
    prefix: String,
}

impl PipelineBranches {
    /// Create branch naming for a target branch
    pub fn new(
        target: impl Into<String>,
        pipeline_id: Option<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            pipeline_id: pipeline_id.filter(|id| !id.is_empty()),
            prefix: prefix.into(),
        }
    }
}

impl VersionControl for PipelineBranches {
    fn branches(&self) -> BranchSet {
        let working = self.pipeline_id.as_ref().map_or_else(
            || self.target.clone(),
            |id| sanitize_branch_name(&format!("{}_{}_{id}", self.prefix, self.target)),
        );

        BranchSet {
            source: self.target.clone(),
            working,
            target: self.target.clone(),
        }
    }
}
