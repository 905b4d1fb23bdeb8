//! CLI commands
//!
//! Command implementations for the `stackup` binary.

mod progress;
mod style;
mod submit;
mod tree;

pub use submit::run_submit;
pub use tree::run_tree;
