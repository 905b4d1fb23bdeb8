//! Git repository access
//!
//! Only what the submission flow needs: the current branch, the git dir
//! (where the store and config live) and remotes.

use crate::error::{Error, Result};
use crate::types::GitRemote;
use gix::bstr::ByteSlice;
use std::path::Path;
use tracing::debug;

/// A discovered git repository
pub struct GitRepo {
    repo: gix::Repository,
}

impl GitRepo {
    /// Find the repository containing `path`
    ///
    /// Honours `GIT_DIR` and `GIT_CEILING_DIRECTORIES` like git does.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = gix::ThreadSafeRepository::discover_with_environment_overrides(path)
            .map_err(|e| Error::Git(format!("discover: {e}")))?
            .to_thread_local();
        debug!("Discovered repository at {}", repo.git_dir().display());
        Ok(Self { repo })
    }

    /// The `.git` directory
    pub fn git_dir(&self) -> &Path {
        self.repo.git_dir()
    }

    /// Short name of the checked-out branch
    pub fn current_branch(&self) -> Result<String> {
        let head = self
            .repo
            .head_name()
            .map_err(|e| Error::Git(format!("read HEAD: {e}")))?
            .ok_or(Error::DetachedHead)?;

        Ok(head.shorten().to_str_lossy().into_owned())
    }

    /// Default branch of `remote`, from its `refs/remotes/<remote>/HEAD`
    ///
    /// `Ok(None)` when the remote HEAD was never recorded (e.g. the remote
    /// was added without a clone or `git remote set-head`).
    pub fn default_branch(&self, remote: &str) -> Result<Option<String>> {
        let remote_head = format!("refs/remotes/{remote}/HEAD");
        let Some(reference) = self
            .repo
            .try_find_reference(remote_head.as_str())
            .map_err(|e| Error::Git(format!("read {remote_head}: {e}")))?
        else {
            return Ok(None);
        };

        let prefix = format!("refs/remotes/{remote}/");
        let branch = reference
            .target()
            .try_name()
            .and_then(|name| name.as_bstr().to_str().ok())
            .and_then(|name| name.strip_prefix(prefix.as_str()))
            .map(ToString::to_string);

        debug!("Default branch of {remote}: {branch:?}");
        Ok(branch)
    }

    /// Configured remotes with their push URLs
    pub fn remotes(&self) -> Vec<GitRemote> {
        self.repo
            .remote_names()
            .into_iter()
            .filter_map(|name| {
                let remote = self.repo.find_remote(&*name).ok()?;
                let url = remote.url(gix::remote::Direction::Push)?;
                Some(GitRemote {
                    name: name.to_str_lossy().into_owned(),
                    url: url.to_bstring().to_string(),
                })
            })
            .collect()
    }
}

/// Pick the remote to use
///
/// An explicitly requested remote must exist. Otherwise `origin` wins,
/// then the first remote.
pub fn select_remote<'a>(
    remotes: &'a [GitRemote],
    requested: Option<&str>,
) -> Result<&'a GitRemote> {
    if remotes.is_empty() {
        return Err(Error::NoSupportedRemotes);
    }

    if let Some(name) = requested {
        return remotes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| Error::RemoteNotFound(name.to_string()));
    }

    Ok(remotes
        .iter()
        .find(|r| r.name == "origin")
        .unwrap_or(&remotes[0]))
}
