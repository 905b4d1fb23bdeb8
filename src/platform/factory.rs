//! Platform service factory

use crate::auth::get_github_auth;
use crate::error::Result;
use crate::platform::{GitHubService, PlatformService};
use crate::types::PlatformConfig;
use tracing::debug;

/// Create a platform service from configuration
///
/// Resolves a token and builds the GitHub client.
pub async fn create_platform_service(
    config: &PlatformConfig,
) -> Result<Box<dyn PlatformService>> {
    let auth = get_github_auth().await?;
    debug!("Authenticated via {:?}", auth.source);
    Ok(Box::new(GitHubService::new(
        &auth.token,
        config.owner.clone(),
        config.repo.clone(),
        config.host.clone(),
    )?))
}
