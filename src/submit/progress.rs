//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, tests, etc.) to receive
//! progress updates during submission.

use crate::error::Error;
use crate::types::PullRequest;
use async_trait::async_trait;
use std::fmt;

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resolving which branches to submit
    Planning,
    /// Creating PRs and fixing PR bases, branch by branch
    Reconciling,
    /// Committing stack metadata
    Committing,
    /// Adding/updating stack comments
    AddingComments,
    /// Opening new PRs in the browser
    OpeningBrowser,
    /// Submission complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Planning => "Planning",
            Self::Reconciling => "Submitting pull requests",
            Self::Committing => "Saving stack metadata",
            Self::AddingComments => "Updating stack comments",
            Self::OpeningBrowser => "Opening browser",
            Self::Complete => "Done",
        };
        f.write_str(label)
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during submission.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called when a PR is created
    async fn on_pr_created(&self, branch: &str, pr: &PullRequest);

    /// Called when an existing PR was retargeted from `previous_base`
    async fn on_pr_updated(&self, branch: &str, pr: &PullRequest, previous_base: &str);

    /// Called when an existing PR already had the right base
    async fn on_pr_unchanged(&self, branch: &str, pr: &PullRequest);

    /// Called when a best-effort step fails
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_pr_created(&self, _branch: &str, _pr: &PullRequest) {}
    async fn on_pr_updated(&self, _branch: &str, _pr: &PullRequest, _previous_base: &str) {}
    async fn on_pr_unchanged(&self, _branch: &str, _pr: &PullRequest) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
