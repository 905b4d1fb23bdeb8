//! Stack topology
//!
//! Ordered views over the parent pointers in the branch stack store.

mod topology;

pub use topology::{children, previous_branches, stack_branches, subsequent_branches};
