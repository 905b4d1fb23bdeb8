//! CLI progress callback with styled output

use crate::cli::style::{Stream, Stylize, arrow, check, hyperlink_url};
use anstream::{eprintln, println};
use async_trait::async_trait;
use stackup::error::Error;
use stackup::submit::{Phase, ProgressCallback};
use stackup::types::PullRequest;

/// CLI progress callback that prints to stdout with styled output
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Planning | Phase::Complete => {}
            _ => println!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_pr_created(&self, branch: &str, pr: &PullRequest) {
        let pr_num = format!("#{}", pr.number);
        let draft = if pr.draft { " (draft)" } else { "" };
        println!(
            "  {} Created PR {} for {}{}",
            check(),
            pr_num.accent(),
            branch.emphasis(),
            draft.muted()
        );
        println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_pr_updated(&self, branch: &str, pr: &PullRequest, previous_base: &str) {
        let pr_num = format!("#{}", pr.number);
        println!(
            "  {} Updated PR {} for {}: base {} {} {}",
            check(),
            pr_num.accent(),
            branch.emphasis(),
            previous_base.muted(),
            arrow(),
            pr.base_ref.accent()
        );
    }

    async fn on_pr_unchanged(&self, branch: &str, pr: &PullRequest) {
        let pr_num = format!("#{}", pr.number);
        println!(
            "  {} PR {} for {} is up to date",
            "-".muted(),
            pr_num.accent(),
            branch.accent()
        );
    }

    async fn on_error(&self, err: &Error) {
        eprintln!("  {}: {}", "warning".warn(), err);
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
