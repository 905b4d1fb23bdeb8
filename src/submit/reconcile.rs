//! Per-branch PR reconciliation
//!
//! Makes the remote PR for one branch match the branch's place in the
//! stack, then records the link in the open transaction.

use crate::error::{Error, ReconcileStep, Result};
use crate::platform::{CreatePr, PlatformService};
use crate::store::{BranchRead, WriteTx};
use crate::submit::plan::expected_base;
use crate::types::{Branch, PullRequest};
use std::future::Future;
use tokio::time::Instant;
use tracing::{debug, warn};

/// What reconciliation did for a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrOutcome {
    /// No PR existed; one was opened
    Created {
        /// The new PR
        pr: PullRequest,
    },
    /// A PR already existed
    Updated {
        /// The PR as it is now
        pr: PullRequest,
        /// Base the PR targeted before it was retargeted, `None` if it was
        /// already correct
        previous_base: Option<String>,
    },
}

impl PrOutcome {
    /// The PR after reconciliation
    pub const fn pr(&self) -> &PullRequest {
        match self {
            Self::Created { pr } | Self::Updated { pr, .. } => pr,
        }
    }

    /// Whether a new PR was opened
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Inputs shared by every branch in one submission
#[derive(Debug, Clone)]
pub struct ReconcileSettings<'a> {
    /// Base for stack roots
    pub trunk: &'a str,
    /// Open new PRs as drafts
    pub draft: bool,
    /// Bound on each remote call
    pub deadline: Option<Instant>,
}

/// Run one remote call under the deadline, tagging failures with the branch
async fn remote_call<T>(
    branch: &str,
    step: ReconcileStep,
    deadline: Option<Instant>,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    let result = match deadline {
        Some(at) => tokio::time::timeout_at(at, call)
            .await
            .unwrap_or_else(|_| Err(Error::Timeout(step))),
        None => call.await,
    };
    result.map_err(|e| Error::reconcile(branch, step, e))
}

/// Ensure `branch_name` has a PR whose base is its parent
///
/// Creates the PR if none is open. If one is open with a stale base, it is
/// retargeted with a single update call. The resulting link is written to
/// `tx`; nothing is committed here.
pub async fn ensure_pull_request(
    tx: &mut WriteTx<'_>,
    platform: &dyn PlatformService,
    branch_name: &str,
    settings: &ReconcileSettings<'_>,
) -> Result<PrOutcome> {
    let branch = tx
        .get(branch_name)
        .cloned()
        .ok_or_else(|| Error::BranchNotFound(branch_name.to_string()))?;
    let base = expected_base(&branch, settings.trunk);

    let existing = remote_call(
        branch_name,
        ReconcileStep::Find,
        settings.deadline,
        platform.find_existing_pr(branch_name),
    )
    .await?;

    let outcome = match existing {
        None => {
            debug!("Creating PR for {branch_name} (base: {base})");
            let pr = remote_call(
                branch_name,
                ReconcileStep::Create,
                settings.deadline,
                platform.create_pr(&CreatePr {
                    head: branch_name,
                    base,
                    title: branch_name,
                    draft: settings.draft,
                }),
            )
            .await?;
            PrOutcome::Created { pr }
        }
        Some(pr) => {
            if branch.pull_request.is_none() {
                // Left behind by an earlier run that aborted after creating it
                warn!(
                    "Found PR #{} for {branch_name} with no local record; adopting it",
                    pr.number
                );
            }

            if pr.base_ref == base {
                debug!("PR #{} for {branch_name} already targets {base}", pr.number);
                PrOutcome::Updated {
                    pr,
                    previous_base: None,
                }
            } else {
                debug!(
                    "Retargeting PR #{} for {branch_name}: {} -> {base}",
                    pr.number, pr.base_ref
                );
                let updated = remote_call(
                    branch_name,
                    ReconcileStep::UpdateBase,
                    settings.deadline,
                    platform.update_pr_base(pr.number, base),
                )
                .await?;
                PrOutcome::Updated {
                    pr: updated,
                    previous_base: Some(pr.base_ref),
                }
            }
        }
    };

    tx.put(Branch {
        pull_request: Some(outcome.pr().meta()),
        ..branch
    });

    Ok(outcome)
}
