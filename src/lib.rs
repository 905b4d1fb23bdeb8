//! stackup - stacked pull requests for git
//!
//! Branch parent pointers are kept in a small transactional store under
//! the git dir. Submitting a stack walks it root to tip and makes sure
//! every branch has a PR that targets its parent.

pub mod auth;
pub mod browser;
pub mod config;
pub mod error;
pub mod platform;
pub mod repo;
pub mod stack;
pub mod store;
pub mod submit;
pub mod types;
