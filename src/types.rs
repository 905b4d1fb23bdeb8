//! Core types for stackup

use serde::{Deserialize, Serialize};

/// Stack metadata for a single git branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    /// Branch name
    pub name: String,
    /// Parent branch name (`None` for the root of a stack)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// PR associated with this branch, once one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestMeta>,
}

impl Branch {
    /// Create a stack root with no parent
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            pull_request: None,
        }
    }

    /// Create a branch stacked on `parent`
    pub fn child(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
            pull_request: None,
        }
    }
}

/// Stored link from a branch to its PR
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestMeta {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub permalink: String,
}

/// A pull request as reported by the hosting platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
    /// Whether the PR is a draft
    pub draft: bool,
}

impl PullRequest {
    /// The link stored in branch metadata for this PR
    pub fn meta(&self) -> PullRequestMeta {
        PullRequestMeta {
            number: self.number,
            permalink: self.html_url.clone(),
        }
    }
}

/// A comment on a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrComment {
    /// Comment ID
    pub id: u64,
    /// Comment body text
    pub body: String,
}

/// A git remote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}

/// Hosting platform configuration
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}
