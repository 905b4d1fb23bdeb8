//! Stack overview comments
//!
//! Every PR in a stack carries one comment listing the whole stack. The
//! comment embeds its data so it can be found and rewritten on later runs.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::store::BranchRead;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::debug;

/// Marker that starts the embedded stack data
pub const COMMENT_DATA_PREFIX: &str = "<!--- STACKUP_STACK: ";
/// Marker that ends the embedded stack data
pub const COMMENT_DATA_POSTFIX: &str = " --->";
/// Marker next to the PR the comment is on
pub const STACK_COMMENT_THIS_PR: &str = "👈";

/// Stack comment data embedded in PR comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackCommentData {
    /// Format version
    pub version: u8,
    /// PRs from root to tip
    pub stack: Vec<StackItem>,
}

/// A single item in the stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackItem {
    /// Branch name
    pub branch_name: String,
    /// PR link
    pub pr_url: String,
    /// PR number
    pub pr_number: u64,
}

/// Build comment data for `stack` from committed branch metadata
///
/// Branches without a PR link are left out.
pub fn build_stack_comment_data<T: BranchRead + ?Sized>(
    snapshot: &T,
    stack: &[String],
) -> StackCommentData {
    let stack = stack
        .iter()
        .filter_map(|name| {
            let pr = snapshot.get(name)?.pull_request.as_ref()?;
            Some(StackItem {
                branch_name: name.clone(),
                pr_url: pr.permalink.clone(),
                pr_number: pr.number,
            })
        })
        .collect();

    StackCommentData { version: 0, stack }
}

/// Render the comment for the PR at `current_idx`
pub fn format_stack_comment(data: &StackCommentData, current_idx: usize) -> Result<String> {
    let encoded_data = BASE64.encode(
        serde_json::to_string(data)
            .map_err(|e| Error::Internal(format!("Failed to serialize stack data: {e}")))?,
    );

    let mut body = format!("{COMMENT_DATA_PREFIX}{encoded_data}{COMMENT_DATA_POSTFIX}\n");

    // Tip at the top, root at the bottom
    for (i, item) in data.stack.iter().enumerate().rev() {
        if i == current_idx {
            let _ = writeln!(body, "* **#{} {STACK_COMMENT_THIS_PR}**", item.pr_number);
        } else {
            let _ = writeln!(body, "* [#{}]({})", item.pr_number, item.pr_url);
        }
    }

    body.push_str("\n---\nThis stack of pull requests is managed by stackup.");
    Ok(body)
}

/// Decode the data embedded in a stack comment body
pub fn parse_stack_comment(body: &str) -> Option<StackCommentData> {
    let start = body.find(COMMENT_DATA_PREFIX)? + COMMENT_DATA_PREFIX.len();
    let end = start + body[start..].find(COMMENT_DATA_POSTFIX)?;
    let json = BASE64.decode(&body[start..end]).ok()?;
    serde_json::from_slice(&json).ok()
}

/// Create or update the stack comment on one PR
async fn upsert_stack_comment(
    platform: &dyn PlatformService,
    data: &StackCommentData,
    current_idx: usize,
    pr_number: u64,
) -> Result<()> {
    let body = format_stack_comment(data, current_idx)?;

    let comments = platform.list_pr_comments(pr_number).await?;
    let existing = comments
        .iter()
        .find(|c| parse_stack_comment(&c.body).is_some());

    if let Some(comment) = existing {
        debug!("Updating stack comment {} on PR #{pr_number}", comment.id);
        platform.update_pr_comment(pr_number, comment.id, &body).await
    } else {
        debug!("Creating stack comment on PR #{pr_number}");
        platform.create_pr_comment(pr_number, &body).await
    }
}

/// Write the stack overview into every PR of `stack`
///
/// Best effort: each PR is attempted, and failures are returned per
/// branch instead of stopping the loop.
pub async fn annotate_with_stack<T: BranchRead + ?Sized>(
    platform: &dyn PlatformService,
    snapshot: &T,
    stack: &[String],
) -> Vec<(String, Error)> {
    let data = build_stack_comment_data(snapshot, stack);
    let mut failures = Vec::new();

    for (idx, item) in data.stack.iter().enumerate() {
        if let Err(e) = upsert_stack_comment(platform, &data, idx, item.pr_number).await {
            failures.push((item.branch_name.clone(), e));
        }
    }

    failures
}
