//! Test data factories for stackup types

#![allow(dead_code)]

use async_trait::async_trait;
use stackup::browser::BrowserLauncher;
use stackup::error::{Error, Result};
use stackup::store::Db;
use stackup::types::{Branch, PlatformConfig, PullRequest, PullRequestMeta};
use std::sync::Mutex;

/// Create a pull request with default values
pub fn make_pr(number: u64, head: &str, base: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        base_ref: base.to_string(),
        head_ref: head.to_string(),
        title: head.to_string(),
        draft: false,
    }
}

/// A branch that already carries a PR link
pub fn linked_branch(name: &str, parent: &str, number: u64) -> Branch {
    Branch {
        pull_request: Some(PullRequestMeta {
            number,
            permalink: format!("https://github.com/test/repo/pull/{number}"),
        }),
        ..Branch::child(name, parent)
    }
}

/// Create a GitHub platform config
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "testowner".to_string(),
        repo: "testrepo".to_string(),
        host: None,
    }
}

/// Commit `branches` into a fresh in-memory store
pub fn db_with(branches: Vec<Branch>) -> Db {
    let db = Db::in_memory();
    let mut tx = db.write_tx().unwrap();
    for branch in branches {
        tx.put(branch);
    }
    tx.commit().unwrap();
    db
}

/// `main-fix` -> `feat-a` -> `feat-b`, with `main-fix` on trunk
pub fn linear_stack() -> Vec<Branch> {
    vec![
        Branch::child("main-fix", "main"),
        Branch::child("feat-a", "main-fix"),
        Branch::child("feat-b", "feat-a"),
    ]
}

/// Browser that records the URLs it was asked to open
#[derive(Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingBrowser {
    /// A browser whose every launch fails
    pub fn failing() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrowserLauncher for RecordingBrowser {
    async fn open(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(Error::Browser(format!("{url}: no display")));
        }
        Ok(())
    }
}
