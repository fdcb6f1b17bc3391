//! Push the main branch to the configured remote.

use super::Lifecycle;
use crate::error::{BreakpointError, Result};
use crate::events::{Event, EventAction};
use crate::git_ops;
use serde_json::json;

/// Result of pushing main.
#[derive(Debug)]
pub struct PushOutcome {
    pub remote: String,
    pub branch: String,
    /// Branch checked out when the operation finished.
    pub final_branch: String,
    pub warnings: Vec<String>,
}

impl Lifecycle<'_> {
    /// Push `main_branch` to `remote`, returning to the branch that was
    /// checked out before.
    ///
    /// Every failure is fatal. If it happens after leaving the original
    /// branch, that branch is checked out again (best-effort) first.
    pub fn push_main(&mut self) -> Result<PushOutcome> {
        if !self.vcs.is_repository(self.root()) {
            return Err(BreakpointError::GitRequired(format!(
                "'{}' is not a git repository; there is no main branch to push",
                self.root().display()
            )));
        }

        let remote = self.ctx.config.remote.clone();
        let main = self.ctx.config.main_branch.clone();
        let original = git_ops::current_branch(self.vcs, self.root())?;
        let switched = original != main;

        if switched {
            git_ops::checkout(self.vcs, self.root(), &main)?;
        }

        if let Err(e) = git_ops::push(self.vcs, self.root(), &remote, &main) {
            if switched
                && let Err(restore) = git_ops::checkout(self.vcs, self.root(), &original)
            {
                return Err(still_on_branch(e, &main, &original, &restore));
            }
            return Err(e);
        }

        if switched {
            git_ops::checkout(self.vcs, self.root(), &original)?;
        }

        self.record(Event::new(EventAction::PushMain).with_details(json!({
            "remote": remote,
            "branch": main,
        })));

        Ok(PushOutcome {
            remote,
            branch: main,
            final_branch: original,
            warnings: self.take_warnings(),
        })
    }
}

/// Extend a push error with the branch the user was left on after the
/// original branch could not be restored.
fn still_on_branch(
    err: BreakpointError,
    current: &str,
    original: &str,
    restore: &BreakpointError,
) -> BreakpointError {
    match err {
        BreakpointError::GitError { command, message } => BreakpointError::GitError {
            command,
            message: format!(
                "{}\nstill on branch '{}': could not return to '{}': {}",
                message, current, original, restore
            ),
        },
        other => other,
    }
}
