//! Shared test utilities

pub mod fixtures;
pub mod mock_platform;

#[allow(unused_imports)]
pub use fixtures::*;
pub use mock_platform::MockPlatformService;
