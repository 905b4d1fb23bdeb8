//! Tree command - print the current stack and its PRs

use crate::cli::style::{self, Stream, Stylize, bullet, hyperlink_url, pipe};
use anstream::println;
use stackup::config::Config;
use stackup::error::Result;
use stackup::repo::{GitRepo, select_remote};
use stackup::stack::{children, previous_branches};
use stackup::store::{BranchRead, Db, ReadTx};
use std::path::Path;

/// Run the tree command
///
/// Prints the stack containing the current branch, tip first, with the
/// trunk at the bottom.
pub fn run_tree(path: &Path) -> Result<()> {
    let repo = GitRepo::discover(path)?;
    let current = repo.current_branch()?;
    let config = Config::load(repo.git_dir())?;
    let db = Db::open_in_git_dir(repo.git_dir())?;
    let snapshot = db.read_tx();

    // Tree still works offline or without a remote; only the trunk label
    // depends on it
    let remotes = repo.remotes();
    let detected = match select_remote(&remotes, None) {
        Ok(remote) => repo.default_branch(&remote.name)?,
        Err(_) => None,
    };
    let trunk = config.resolve_trunk(detected);

    if snapshot.get(&current).is_none() {
        println!("{}", format!("{current} is not part of a stack").muted());
        return Ok(());
    }

    let root = previous_branches(&snapshot, &current)?
        .into_iter()
        .next()
        .unwrap_or_else(|| current.clone());

    let mut lines = Vec::new();
    collect_lines(&snapshot, &root, 0, &mut lines)?;

    println!("{}", "Stack".emphasis());
    println!();
    // Tip first, the way branches sit on top of each other
    for (depth, name) in lines.iter().rev() {
        let indent = "  ".repeat(*depth);
        let marker = if *name == current {
            style::CURRENT.accent().to_string()
        } else {
            bullet().to_string()
        };
        let pr = match snapshot.get(name).and_then(|b| b.pull_request.as_ref()) {
            Some(meta) => format!(
                "{} {}",
                format!("#{}", meta.number).success(),
                hyperlink_url(Stream::Stdout, &meta.permalink)
            ),
            None => "no PR".muted().to_string(),
        };
        println!("  {indent}{marker} {} {pr}", name.accent());
        println!("  {indent}{}", pipe());
    }
    println!("  {}", trunk.muted());

    Ok(())
}

/// Depth-first, children in name order
fn collect_lines(
    snapshot: &ReadTx,
    name: &str,
    depth: usize,
    out: &mut Vec<(usize, String)>,
) -> Result<()> {
    out.push((depth, name.to_string()));
    for child in children(snapshot, name)? {
        collect_lines(snapshot, &child, depth + 1, out)?;
    }
    Ok(())
}
