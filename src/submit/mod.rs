//! Stack submission engine
//!
//! Handles submitting a stack of branches as PRs:
//! 1. Planning - which branches, in which order
//! 2. Reconciliation - create each PR or fix its base, root to tip
//! 3. Commit - persist PR links, then update stack comments

mod comment;
mod execute;
mod plan;
mod progress;
mod reconcile;

pub use comment::{
    COMMENT_DATA_POSTFIX, COMMENT_DATA_PREFIX, STACK_COMMENT_THIS_PR, StackCommentData, StackItem,
    annotate_with_stack, build_stack_comment_data, format_stack_comment, parse_stack_comment,
};
pub use execute::{BranchSubmission, SubmitContext, SubmitOptions, SubmitOutcome, submit_stack};
pub use plan::{branches_to_submit, expected_base};
pub use progress::{NoopProgress, Phase, ProgressCallback};
pub use reconcile::{PrOutcome, ReconcileSettings, ensure_pull_request};
