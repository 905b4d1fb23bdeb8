//! Submit command - submit the current branch's stack as PRs

use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, check};
use anstream::println;
use stackup::browser::SystemBrowser;
use stackup::config::Config;
use stackup::error::{Error, Result};
use stackup::platform::{create_platform_service, parse_repo_info};
use stackup::repo::{GitRepo, select_remote};
use stackup::store::{BranchRead, Db};
use stackup::submit::{SubmitContext, SubmitOptions, submit_stack};
use std::path::Path;
use tracing::debug;

/// Run the submit command
pub async fn run_submit(
    path: &Path,
    remote: Option<&str>,
    current: bool,
    draft: bool,
) -> Result<()> {
    let repo = GitRepo::discover(path)?;
    let branch = repo.current_branch()?;
    let config = Config::load(repo.git_dir())?;
    let db = Db::open_in_git_dir(repo.git_dir())?;

    // Fail before touching the network when the branch isn't tracked
    if db.read_tx().get(&branch).is_none() {
        return Err(Error::BranchNotFound(branch));
    }

    let remotes = repo.remotes();
    let remote = select_remote(&remotes, remote)?;
    debug!("Using remote {} ({})", remote.name, remote.url);
    let trunk = config.resolve_trunk(repo.default_branch(&remote.name)?);
    let platform_config = parse_repo_info(&remote.url)?;
    let platform = create_platform_service(&platform_config).await?;

    let target = platform.config();
    println!(
        "Submitting {} to {}",
        branch.accent(),
        format!("{}/{}", target.owner, target.repo).emphasis()
    );

    let ctx = SubmitContext {
        db: &db,
        platform: platform.as_ref(),
        config: &config,
        trunk: &trunk,
        progress: &CliProgress,
        browser: &SystemBrowser,
    };
    let options = SubmitOptions {
        only_up_to_current: current,
        draft: draft.then_some(true),
        deadline: None,
    };

    let outcome = submit_stack(&ctx, &branch, &options).await?;

    let submitted = outcome.branches.len();
    let created = outcome.created_permalinks().len();
    println!();
    println!(
        "{} {}",
        check(),
        format!(
            "Submitted {submitted} branch{}, created {created} PR{}",
            if submitted == 1 { "" } else { "es" },
            if created == 1 { "" } else { "s" }
        )
        .success()
    );
    if !outcome.warnings.is_empty() {
        println!(
            "{}",
            format!("{} follow-up step(s) failed", outcome.warnings.len()).muted()
        );
    }

    Ok(())
}
