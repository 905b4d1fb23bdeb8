//! Submission planning
//!
//! Decides which branches get PRs, and in what order.

use crate::error::Result;
use crate::stack::{previous_branches, stack_branches, subsequent_branches};
use crate::store::BranchRead;
use crate::types::Branch;
use std::collections::HashSet;

/// Branches to submit, root to tip
///
/// With `only_up_to_current`, the ancestors of `current` and `current`
/// itself. Otherwise the whole stack followed by the descendants of
/// `current`. The second list is a subset of the first in a forest, so
/// duplicates are dropped keeping the first occurrence.
pub fn branches_to_submit<T: BranchRead + ?Sized>(
    tx: &T,
    current: &str,
    only_up_to_current: bool,
) -> Result<Vec<String>> {
    let candidates = if only_up_to_current {
        let mut branches = previous_branches(tx, current)?;
        branches.push(current.to_string());
        branches
    } else {
        let mut branches = stack_branches(tx, current)?;
        branches.extend(subsequent_branches(tx, current)?);
        branches
    };

    let mut seen = HashSet::new();
    Ok(candidates
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect())
}

/// Base branch a branch's PR should target
///
/// The parent branch, or `trunk` for a stack root.
pub fn expected_base<'a>(branch: &'a Branch, trunk: &'a str) -> &'a str {
    branch.parent.as_deref().unwrap_or(trunk)
}
