//! Opening PR links in a browser

use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Something that can show a URL to the user
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Open `url`
    async fn open(&self, url: &str) -> Result<()>;
}

/// Launches the platform's default browser
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            // Empty title argument so `start` doesn't treat the URL as one
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

#[async_trait]
impl BrowserLauncher for SystemBrowser {
    async fn open(&self, url: &str) -> Result<()> {
        debug!("Opening {url} in browser");
        let output = Self::command(url)
            .output()
            .await
            .map_err(|e| Error::Browser(format!("{url}: {e}")))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::Browser(format!(
                "{url}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

/// Never opens anything
pub struct NoopBrowser;

#[async_trait]
impl BrowserLauncher for NoopBrowser {
    async fn open(&self, _url: &str) -> Result<()> {
        Ok(())
    }
}
