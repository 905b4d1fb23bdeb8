//! Mock platform service for testing
//!
//! Behaves like a tiny PR host: created PRs are returned by later
//! `find_existing_pr` calls and base updates stick, so repeated
//! submissions can be tested against the same mock.

#![allow(dead_code)]

use async_trait::async_trait;
use stackup::error::{Error, Result};
use stackup::platform::{CreatePr, PlatformService};
use stackup::types::{PlatformConfig, PrComment, PullRequest};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub draft: bool,
}

/// Call record for `update_pr_base`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBaseCall {
    pub pr_number: u64,
    pub new_base: String,
}

/// Call record for `create_pr_comment` and `update_pr_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCall {
    pub pr_number: u64,
    pub comment_id: Option<u64>,
    pub body: String,
}

/// Injected failure, optionally limited to one branch
#[derive(Debug, Clone)]
struct Failure {
    branch: Option<String>,
    message: String,
}

impl Failure {
    fn applies_to(&self, branch: &str) -> bool {
        self.branch.as_deref().is_none_or(|b| b == branch)
    }
}

/// Hand-written mock of `PlatformService`
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Open PRs keyed by head branch
/// - Error injection for failure path testing
/// - Artificial latency for deadline tests
pub struct MockPlatformService {
    config: PlatformConfig,
    next_pr_number: AtomicU64,
    next_comment_id: AtomicU64,
    open_prs: Mutex<HashMap<String, PullRequest>>,
    comments: Mutex<HashMap<u64, Vec<PrComment>>>,
    latency: Mutex<Option<Duration>>,
    // Call tracking
    find_pr_calls: Mutex<Vec<String>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    update_base_calls: Mutex<Vec<UpdateBaseCall>>,
    comment_calls: Mutex<Vec<CommentCall>>,
    // Error injection
    error_on_find_pr: Mutex<Option<Failure>>,
    error_on_create_pr: Mutex<Option<Failure>>,
    error_on_update_base: Mutex<Option<Failure>>,
    error_on_comment: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_pr_number: AtomicU64::new(1),
            next_comment_id: AtomicU64::new(100),
            open_prs: Mutex::new(HashMap::new()),
            comments: Mutex::new(HashMap::new()),
            latency: Mutex::new(None),
            find_pr_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            update_base_calls: Mutex::new(Vec::new()),
            comment_calls: Mutex::new(Vec::new()),
            error_on_find_pr: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            error_on_update_base: Mutex::new(None),
            error_on_comment: Mutex::new(None),
        }
    }

    // === Setup ===

    /// Register an already open PR
    pub fn add_open_pr(&self, pr: PullRequest) {
        self.next_pr_number.fetch_max(pr.number + 1, Ordering::SeqCst);
        self.open_prs
            .lock()
            .unwrap()
            .insert(pr.head_ref.clone(), pr);
    }

    /// Currently open PR for a head branch
    pub fn open_pr(&self, head: &str) -> Option<PullRequest> {
        self.open_prs.lock().unwrap().get(head).cloned()
    }

    /// Comments currently on a PR
    pub fn comments_on(&self, pr_number: u64) -> Vec<PrComment> {
        self.comments
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default()
    }

    /// Put an unrelated comment on a PR
    pub fn add_comment(&self, pr_number: u64, body: &str) {
        self.comments
            .lock()
            .unwrap()
            .entry(pr_number)
            .or_default()
            .push(PrComment {
                id: self.next_comment_id.fetch_add(1, Ordering::SeqCst),
                body: body.to_string(),
            });
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    // === Error injection ===

    /// Make `find_existing_pr` fail for every branch
    pub fn fail_find_pr(&self, msg: &str) {
        *self.error_on_find_pr.lock().unwrap() = Some(Failure {
            branch: None,
            message: msg.to_string(),
        });
    }

    /// Make `create_pr` fail for every branch
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(Failure {
            branch: None,
            message: msg.to_string(),
        });
    }

    /// Make `create_pr` fail only when `branch` is the head
    pub fn fail_create_pr_for(&self, branch: &str, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(Failure {
            branch: Some(branch.to_string()),
            message: msg.to_string(),
        });
    }

    /// Make `update_pr_base` fail
    pub fn fail_update_base(&self, msg: &str) {
        *self.error_on_update_base.lock().unwrap() = Some(Failure {
            branch: None,
            message: msg.to_string(),
        });
    }

    /// Make every comment write fail
    pub fn fail_comments(&self, msg: &str) {
        *self.error_on_comment.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification ===

    /// Get all branches that `find_existing_pr` was called with
    pub fn get_find_pr_calls(&self) -> Vec<String> {
        self.find_pr_calls.lock().unwrap().clone()
    }

    /// Get all `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Get all `update_pr_base` calls
    pub fn get_update_base_calls(&self) -> Vec<UpdateBaseCall> {
        self.update_base_calls.lock().unwrap().clone()
    }

    /// Get all comment writes
    pub fn get_comment_calls(&self) -> Vec<CommentCall> {
        self.comment_calls.lock().unwrap().clone()
    }

    /// Assert that `create_pr` was called with specific head and base
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }

    /// Assert that `update_pr_base` was called with specific args
    pub fn assert_update_base_called(&self, pr_number: u64, new_base: &str) {
        let calls = self.get_update_base_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.pr_number == pr_number && c.new_base == new_base),
            "Expected update_pr_base({pr_number}, {new_base}) but got: {calls:?}"
        );
    }

    async fn delay(&self) {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn injected(slot: &Mutex<Option<Failure>>, branch: &str) -> Result<()> {
        match slot.lock().unwrap().as_ref() {
            Some(failure) if failure.applies_to(branch) => {
                Err(Error::Platform(failure.message.clone()))
            }
            _ => Ok(()),
        }
    }

    fn record_comment(&self, pr_number: u64, comment_id: Option<u64>, body: &str) -> Result<()> {
        self.comment_calls.lock().unwrap().push(CommentCall {
            pr_number,
            comment_id,
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_comment.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let mut comments = self.comments.lock().unwrap();
        let list = comments.entry(pr_number).or_default();
        match comment_id.and_then(|id| list.iter_mut().find(|c| c.id == id)) {
            Some(existing) => existing.body = body.to_string(),
            None => list.push(PrComment {
                id: self.next_comment_id.fetch_add(1, Ordering::SeqCst),
                body: body.to_string(),
            }),
        }
        Ok(())
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn find_existing_pr(&self, head_branch: &str) -> Result<Option<PullRequest>> {
        self.find_pr_calls
            .lock()
            .unwrap()
            .push(head_branch.to_string());
        self.delay().await;
        Self::injected(&self.error_on_find_pr, head_branch)?;

        Ok(self.open_pr(head_branch))
    }

    async fn create_pr(&self, pr: &CreatePr<'_>) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: pr.head.to_string(),
            base: pr.base.to_string(),
            title: pr.title.to_string(),
            draft: pr.draft,
        });
        self.delay().await;
        Self::injected(&self.error_on_create_pr, pr.head)?;

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let created = PullRequest {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            base_ref: pr.base.to_string(),
            head_ref: pr.head.to_string(),
            title: pr.title.to_string(),
            draft: pr.draft,
        };
        self.open_prs
            .lock()
            .unwrap()
            .insert(created.head_ref.clone(), created.clone());
        Ok(created)
    }

    async fn update_pr_base(&self, pr_number: u64, new_base: &str) -> Result<PullRequest> {
        self.update_base_calls.lock().unwrap().push(UpdateBaseCall {
            pr_number,
            new_base: new_base.to_string(),
        });
        self.delay().await;
        if let Some(failure) = self.error_on_update_base.lock().unwrap().as_ref() {
            return Err(Error::Platform(failure.message.clone()));
        }

        let mut prs = self.open_prs.lock().unwrap();
        let pr = prs
            .values_mut()
            .find(|pr| pr.number == pr_number)
            .ok_or_else(|| Error::Platform(format!("no PR #{pr_number}")))?;
        pr.base_ref = new_base.to_string();
        Ok(pr.clone())
    }

    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>> {
        Ok(self.comments_on(pr_number))
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        self.record_comment(pr_number, None, body)
    }

    async fn update_pr_comment(&self, pr_number: u64, comment_id: u64, body: &str) -> Result<()> {
        self.record_comment(pr_number, Some(comment_id), body)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
