//! Stack submission
//!
//! Drives one submission end to end inside a single store transaction:
//! plan the branch list, reconcile each branch's PR in order, commit, then
//! run the best-effort follow-ups from committed state.

use crate::browser::BrowserLauncher;
use crate::config::Config;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::stack::stack_branches;
use crate::store::Db;
use crate::submit::comment::annotate_with_stack;
use crate::submit::plan::branches_to_submit;
use crate::submit::reconcile::{PrOutcome, ReconcileSettings, ensure_pull_request};
use crate::submit::{Phase, ProgressCallback};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Per-call submission options
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// Submit only the current branch and its ancestors
    pub only_up_to_current: bool,
    /// Draft override; `None` uses the configured default
    pub draft: Option<bool>,
    /// Give up on remote calls after this instant
    pub deadline: Option<Instant>,
}

/// Collaborators a submission runs against
pub struct SubmitContext<'a> {
    /// Branch stack store
    pub db: &'a Db,
    /// Hosting platform
    pub platform: &'a dyn PlatformService,
    /// Loaded configuration
    pub config: &'a Config,
    /// Resolved trunk branch, the base for stack roots
    pub trunk: &'a str,
    /// Progress sink
    pub progress: &'a dyn ProgressCallback,
    /// Used to show newly created PRs
    pub browser: &'a dyn BrowserLauncher,
}

/// Result for one branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSubmission {
    /// Branch name
    pub branch: String,
    /// What happened to its PR
    pub outcome: PrOutcome,
}

/// Result of a committed submission
#[derive(Debug, Clone, Default)]
pub struct SubmitOutcome {
    /// Branches in submission order
    pub branches: Vec<BranchSubmission>,
    /// Failures of best-effort follow-up steps
    pub warnings: Vec<String>,
}

impl SubmitOutcome {
    /// Links of newly created PRs, in creation order
    pub fn created_permalinks(&self) -> Vec<&str> {
        self.branches
            .iter()
            .filter(|b| b.outcome.is_created())
            .map(|b| b.outcome.pr().html_url.as_str())
            .collect()
    }

    /// Branch names in submission order
    pub fn submitted_branches(&self) -> Vec<&str> {
        self.branches.iter().map(|b| b.branch.as_str()).collect()
    }
}

/// Submit the stack containing `current_branch`
///
/// Either every branch is reconciled and the new PR links are committed,
/// or the transaction is aborted and the first error is returned. PRs
/// opened before a failure stay open on the host; the next run picks them
/// up again through `find_existing_pr`.
pub async fn submit_stack(
    ctx: &SubmitContext<'_>,
    current_branch: &str,
    options: &SubmitOptions,
) -> Result<SubmitOutcome> {
    ctx.progress.on_phase(Phase::Planning).await;

    // Aborts on drop, so every early return below leaves the store untouched
    let mut tx = ctx.db.write_tx()?;

    let original_stack = stack_branches(&tx, current_branch)?;
    let branches = branches_to_submit(&tx, current_branch, options.only_up_to_current)?;
    info!(
        "Submitting {} branch(es) from {current_branch}: {branches:?}",
        branches.len()
    );

    let settings = ReconcileSettings {
        trunk: ctx.trunk,
        draft: ctx.config.resolve_draft(options.draft),
        deadline: options.deadline,
    };

    ctx.progress.on_phase(Phase::Reconciling).await;

    let mut submitted: Vec<BranchSubmission> = Vec::with_capacity(branches.len());
    for branch in &branches {
        let outcome = match ensure_pull_request(&mut tx, ctx.platform, branch, &settings).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let created = submitted.iter().filter(|b| b.outcome.is_created()).count();
                if created > 0 {
                    warn!(
                        "Aborting submission at {branch}; {created} PR(s) opened by this run stay open without local links"
                    );
                    ctx.progress
                        .on_message(&format!(
                            "{created} PR(s) were opened before the failure; the next submit will pick them up"
                        ))
                        .await;
                }
                return Err(e);
            }
        };

        match &outcome {
            PrOutcome::Created { pr } => ctx.progress.on_pr_created(branch, pr).await,
            PrOutcome::Updated {
                pr,
                previous_base: Some(previous),
            } => ctx.progress.on_pr_updated(branch, pr, previous).await,
            PrOutcome::Updated {
                pr,
                previous_base: None,
            } => ctx.progress.on_pr_unchanged(branch, pr).await,
        }

        submitted.push(BranchSubmission {
            branch: branch.clone(),
            outcome,
        });
    }

    ctx.progress.on_phase(Phase::Committing).await;
    tx.commit()?;
    info!("Committed stack metadata for {} branch(es)", submitted.len());

    let mut outcome = SubmitOutcome {
        branches: submitted,
        warnings: Vec::new(),
    };

    if ctx.config.pull_request.write_stack {
        ctx.progress.on_phase(Phase::AddingComments).await;
        let snapshot = ctx.db.read_tx();
        for (branch, e) in annotate_with_stack(ctx.platform, &snapshot, &original_stack).await {
            warn!("Failed to update stack comment for {branch}: {e}");
            ctx.progress.on_error(&e).await;
            outcome
                .warnings
                .push(format!("Failed to update stack comment for {branch}: {e}"));
        }
    }

    if ctx.config.pull_request.open_browser {
        let links: Vec<String> = outcome
            .created_permalinks()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        if !links.is_empty() {
            ctx.progress.on_phase(Phase::OpeningBrowser).await;
        }
        for link in &links {
            if let Err(e) = ctx.browser.open(link).await {
                warn!("{e}");
                ctx.progress.on_error(&e).await;
                outcome.warnings.push(e.to_string());
            }
        }
    }

    debug!("Submission finished with {} warning(s)", outcome.warnings.len());
    ctx.progress.on_phase(Phase::Complete).await;

    Ok(outcome)
}
