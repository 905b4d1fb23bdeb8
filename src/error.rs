//! Error types for stackup

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// The remote call a reconciliation step was making when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStep {
    /// Looking up an existing PR for the branch
    Find,
    /// Creating a new PR
    Create,
    /// Retargeting an existing PR at the branch's parent
    UpdateBase,
}

impl fmt::Display for ReconcileStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Find => write!(f, "find existing PR"),
            Self::Create => write!(f, "create PR"),
            Self::UpdateBase => write!(f, "update PR base branch"),
        }
    }
}

/// Errors produced by stackup
#[derive(Debug, Error)]
pub enum Error {
    /// Branch has no stack metadata
    #[error("branch not found in stack metadata: {0}")]
    BranchNotFound(String),

    /// Parent pointers loop back on themselves
    #[error("stack metadata contains a cycle through branch {0}")]
    StackCycle(String),

    /// A per-branch remote call failed
    #[error("failed to {step} for {branch}: {source}")]
    Reconcile {
        /// Branch being reconciled
        branch: String,
        /// Remote call that failed
        step: ReconcileStep,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Deadline expired during a remote call
    #[error("timed out while trying to {0}")]
    Timeout(ReconcileStep),

    /// Branch stack store failure
    #[error("store error: {0}")]
    Store(String),

    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(String),

    /// Git repository access failed
    #[error("git error: {0}")]
    Git(String),

    /// HEAD is not on a branch
    #[error("HEAD is detached; check out a branch first")]
    DetachedHead,

    /// No GitHub remote configured
    #[error("no supported remotes found (GitHub)")]
    NoSupportedRemotes,

    /// Named remote does not exist
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// GitHub API failure
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic hosting platform failure
    #[error("platform error: {0}")]
    Platform(String),

    /// Authentication failure
    #[error("authentication error: {0}")]
    Auth(String),

    /// Browser could not be launched
    #[error("failed to open browser: {0}")]
    Browser(String),

    /// Unparseable input
    #[error("parse error: {0}")]
    Parse(String),

    /// Internal invariant violated
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl Error {
    /// Wrap a remote failure with the branch and step it happened on
    pub fn reconcile(branch: &str, step: ReconcileStep, source: Self) -> Self {
        Self::Reconcile {
            branch: branch.to_string(),
            step,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_error_names_branch_and_step() {
        let err = Error::reconcile(
            "feat-a",
            ReconcileStep::Create,
            Error::Platform("422 Unprocessable Entity".to_string()),
        );

        assert_eq!(
            err.to_string(),
            "failed to create PR for feat-a: platform error: 422 Unprocessable Entity"
        );
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(
            Error::Timeout(ReconcileStep::UpdateBase).to_string(),
            "timed out while trying to update PR base branch"
        );
    }
}
