//! Git operations layered over the [`Vcs`](crate::git::Vcs) adapter.
//!
//! Every function takes the adapter and the project root explicitly and
//! queries git fresh; nothing here caches branch or status information.

mod branch;
mod commit;
mod diff;
mod merge;

pub use branch::{branch_exists, checkout, create_and_checkout, current_branch};
pub use commit::{commit_all, commit_paths};
pub use diff::head_changed_files;
pub use merge::{merge, push};

use crate::error::BreakpointError;

/// Append a manual-recovery hint to a git error's message.
fn with_hint(err: BreakpointError, hint: &str) -> BreakpointError {
    match err {
        BreakpointError::GitError { command, message } => BreakpointError::GitError {
            command,
            message: format!("{}\n\n{}", message, hint),
        },
        other => other,
    }
}
