//! GitHub detection from remote URLs

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use regex::Regex;
use std::env;
use std::sync::LazyLock;

// SSH format: git@host:owner/repo.git
static RE_SCP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@/]+@[^:]+:(.+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});

/// Whether a remote URL points at GitHub (or the `GH_HOST` enterprise host)
pub fn detect_github(url: &str) -> bool {
    let gh_host = env::var("GH_HOST").ok();

    extract_hostname(url).is_some_and(|hostname| {
        hostname == "github.com"
            || hostname.ends_with(".github.com")
            || gh_host.as_ref().is_some_and(|h| hostname == *h)
    })
}

/// Parse repository info (owner/repo) from a remote URL
pub fn parse_repo_info(url: &str) -> Result<PlatformConfig> {
    if !detect_github(url) {
        return Err(Error::NoSupportedRemotes);
    }
    let hostname = extract_hostname(url);

    let path = extract_path(url)
        .ok_or_else(|| Error::Parse(format!("cannot parse remote URL: {url}")))?;

    let Some((owner, repo)) = path.rsplit_once('/') else {
        return Err(Error::Parse(format!("invalid repo path: {path}")));
    };
    if owner.is_empty() || repo.is_empty() {
        return Err(Error::Parse(format!("invalid repo path: {path}")));
    }

    // Anything other than github.com is an enterprise host
    let host = hostname.filter(|h| h != "github.com");

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host,
    })
}

fn extract_hostname(url: &str) -> Option<String> {
    if let Some(caps) = RE_SCP.captures(url) {
        let whole = caps.get(0)?.as_str();
        return whole
            .split_once('@')
            .and_then(|(_, rest)| rest.split(':').next())
            .map(ToString::to_string);
    }

    // https:// and ssh:// forms
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
}

fn extract_path(url: &str) -> Option<String> {
    if let Some(caps) = RE_SCP.captures(url) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    let parsed = url::Url::parse(url).ok()?;
    let path = parsed.path().trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}
