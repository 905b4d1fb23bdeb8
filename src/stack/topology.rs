//! Stack topology queries
//!
//! All functions read a transaction snapshot and return branch names
//! ordered root to tip. A parent name with no record of its own (usually
//! the trunk branch) ends a stack.

use crate::error::{Error, Result};
use crate::store::BranchRead;
use crate::types::Branch;
use std::collections::{HashMap, HashSet};
use tracing::debug;

fn lookup<'a, T: BranchRead + ?Sized>(tx: &'a T, name: &str) -> Result<&'a Branch> {
    tx.get(name)
        .ok_or_else(|| Error::BranchNotFound(name.to_string()))
}

/// Parent name -> child names, children in name order
fn children_index<T: BranchRead + ?Sized>(tx: &T) -> HashMap<&str, Vec<&str>> {
    let mut index: HashMap<&str, Vec<&str>> = HashMap::new();
    for branch in tx.branches() {
        if let Some(parent) = branch.parent.as_deref() {
            index.entry(parent).or_default().push(branch.name.as_str());
        }
    }
    index
}

/// Direct children of `branch`, in name order
pub fn children<T: BranchRead + ?Sized>(tx: &T, branch: &str) -> Result<Vec<String>> {
    lookup(tx, branch)?;
    Ok(children_index(tx)
        .remove(branch)
        .unwrap_or_default()
        .into_iter()
        .map(ToString::to_string)
        .collect())
}

/// Ancestors of `branch`, root first, excluding `branch` itself
pub fn previous_branches<T: BranchRead + ?Sized>(tx: &T, branch: &str) -> Result<Vec<String>> {
    let mut current = lookup(tx, branch)?;
    let mut seen: HashSet<&str> = HashSet::from([branch]);
    let mut chain = Vec::new();

    while let Some(parent_name) = current.parent.as_deref() {
        let Some(parent) = tx.get(parent_name) else {
            // Parent is trunk (or otherwise untracked)
            break;
        };
        if !seen.insert(parent_name) {
            return Err(Error::StackCycle(parent_name.to_string()));
        }
        chain.push(parent_name.to_string());
        current = parent;
    }

    chain.reverse();
    Ok(chain)
}

/// Descendants of `branch`, excluding `branch` itself
///
/// Depth-first pre-order, so every branch comes after all of its ancestors.
/// Siblings are visited in name order.
pub fn subsequent_branches<T: BranchRead + ?Sized>(tx: &T, branch: &str) -> Result<Vec<String>> {
    lookup(tx, branch)?;
    let index = children_index(tx);

    let mut seen: HashSet<&str> = HashSet::from([branch]);
    let mut result = Vec::new();
    let mut pending: Vec<&str> = index
        .get(branch)
        .map(|c| c.iter().rev().copied().collect())
        .unwrap_or_default();

    while let Some(name) = pending.pop() {
        if !seen.insert(name) {
            return Err(Error::StackCycle(name.to_string()));
        }
        result.push(name.to_string());
        if let Some(kids) = index.get(name) {
            pending.extend(kids.iter().rev().copied());
        }
    }

    Ok(result)
}

/// Every branch in the stack containing `branch`, root to tip
pub fn stack_branches<T: BranchRead + ?Sized>(tx: &T, branch: &str) -> Result<Vec<String>> {
    let previous = previous_branches(tx, branch)?;
    let root = previous.first().map_or(branch, String::as_str).to_string();

    let mut stack = vec![root.clone()];
    stack.extend(subsequent_branches(tx, &root)?);

    debug!("Stack for {branch}: {stack:?}");
    Ok(stack)
}
