//! Hosting platform services
//!
//! The review-request client the submission engine talks to.

mod detection;
mod factory;
mod github;

pub use detection::{detect_github, parse_repo_info};
pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{PlatformConfig, PrComment, PullRequest};
use async_trait::async_trait;

/// Parameters for opening a new PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePr<'a> {
    /// Head branch
    pub head: &'a str,
    /// Base branch the PR merges into
    pub base: &'a str,
    /// PR title
    pub title: &'a str,
    /// Open as a draft
    pub draft: bool,
}

/// Platform service trait for PR operations
///
/// The submission engine depends only on this trait, so tests can swap in
/// a mock.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Find an existing open PR for a head branch
    async fn find_existing_pr(&self, head_branch: &str) -> Result<Option<PullRequest>>;

    /// Create a new PR
    async fn create_pr(&self, pr: &CreatePr<'_>) -> Result<PullRequest>;

    /// Update the base branch of an existing PR
    async fn update_pr_base(&self, pr_number: u64, new_base: &str) -> Result<PullRequest>;

    /// List comments on a PR
    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>>;

    /// Create a comment on a PR
    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()>;

    /// Update an existing comment on a PR
    async fn update_pr_comment(&self, pr_number: u64, comment_id: u64, body: &str) -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
