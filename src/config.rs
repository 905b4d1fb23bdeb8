//! Configuration
//!
//! Read from `<git-dir>/stackup/config.toml`, falling back to
//! `<user config dir>/stackup/config.toml`. The first file found is used
//! as a whole; missing keys take their defaults.
//!
//! ```toml
//! trunk = "main"  # optional, detected from the remote's HEAD when unset
//!
//! [pull-request]
//! draft = false
//! write-stack = true
//! open-browser = true
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Trunk used when neither config nor the remote names one
pub const DEFAULT_TRUNK: &str = "main";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Base branch for PRs of stack roots; `None` means detect it
    pub trunk: Option<String>,
    /// Pull request behaviour
    pub pull_request: PullRequestConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trunk: None,
            pull_request: PullRequestConfig::default(),
        }
    }
}

/// `[pull-request]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PullRequestConfig {
    /// Open new PRs as drafts
    pub draft: bool,
    /// Keep a stack overview comment on every PR in the stack
    pub write_stack: bool,
    /// Open newly created PRs in the browser
    pub open_browser: bool,
}

impl Default for PullRequestConfig {
    fn default() -> Self {
        Self {
            draft: false,
            write_stack: true,
            open_browser: true,
        }
    }
}

impl Config {
    /// Load configuration for the repository whose git dir is `git_dir`
    pub fn load(git_dir: &Path) -> Result<Self> {
        for path in Self::search_paths(git_dir) {
            if let Some(config) = Self::load_from(&path)? {
                debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Candidate files, highest precedence first
    pub fn search_paths(git_dir: &Path) -> Vec<PathBuf> {
        let mut paths = vec![git_dir.join("stackup").join(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("stackup").join(CONFIG_FILE_NAME));
        }
        paths
    }

    /// Load a single file; `Ok(None)` when it does not exist
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Trunk branch for stack roots
    ///
    /// The configured value wins, then `detected` (the remote's default
    /// branch), then [`DEFAULT_TRUNK`].
    pub fn resolve_trunk(&self, detected: Option<String>) -> String {
        self.trunk
            .clone()
            .or(detected)
            .unwrap_or_else(|| DEFAULT_TRUNK.to_string())
    }

    /// Draft flag for new PRs; an explicit override wins
    pub fn resolve_draft(&self, override_draft: Option<bool>) -> bool {
        override_draft.unwrap_or(self.pull_request.draft)
    }
}
