//! Breakpoint lifecycle controller.
//!
//! Implements the four operations of a breakpoint: create (initial snapshot
//! plus branch), add step (changed-file capture, commit, merge-back), push
//! main, and finish (change log). Git is reached only through the injected
//! [`Vcs`] and every branch or status question is asked fresh.
//!
//! Git failures during bookkeeping do not abort an operation once the user has
//! committed to it: they are collected as warnings on the outcome and the
//! filesystem snapshot still completes.

mod create;
mod finish;
mod push;
mod snapshot;
mod step;


pub use create::CreateOutcome;
pub use finish::FinishOutcome;
pub use push::PushOutcome;
pub use step::StepOutcome;

use crate::context::ProjectContext;
use crate::error::{BreakpointError, Result};
use crate::events::{Event, append_event};
use crate::git::Vcs;
use crate::git_ops;
use crate::naming::{NameKind, validate_name};
use crate::prompt::Prompter;
use std::path::Path;

/// Lifecycle state of a breakpoint, derived from the filesystem.
///
/// Adding a step passes through a transient stepping phase inside a single
/// call; it is never observable between commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointState {
    /// No breakpoint directory.
    Uninitialized,
    /// Breakpoint directory present.
    Active,
}

impl BreakpointState {
    pub fn of(ctx: &ProjectContext, name: &str) -> Self {
        if ctx.breakpoint_dir(name).is_dir() {
            BreakpointState::Active
        } else {
            BreakpointState::Uninitialized
        }
    }
}

/// Controller for one command invocation.
pub struct Lifecycle<'a> {
    ctx: &'a ProjectContext,
    vcs: &'a dyn Vcs,
    prompter: &'a mut dyn Prompter,
    warnings: Vec<String>,
}

impl<'a> Lifecycle<'a> {
    pub fn new(ctx: &'a ProjectContext, vcs: &'a dyn Vcs, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            ctx,
            vcs,
            prompter,
            warnings: Vec::new(),
        }
    }

    fn root(&self) -> &Path {
        &self.ctx.root
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// Use `given` or ask for a name, then validate it.
    fn resolve_name(&mut self, given: Option<&str>, kind: NameKind) -> Result<String> {
        let raw = match given {
            Some(name) => name.to_string(),
            None => {
                let prompt = match kind {
                    NameKind::Breakpoint => "Breakpoint name",
                    NameKind::Step => "Step name",
                };
                self.prompter.input(prompt)?.ok_or_else(|| {
                    BreakpointError::ValidationError(format!("{} cannot be empty", kind))
                })?
            }
        };
        validate_name(&raw, kind)
    }

    /// Append an event; a failure becomes a warning.
    fn record(&mut self, event: Event) {
        if let Err(e) = append_event(self.ctx, &event) {
            self.warn(format!("failed to record event: {}", e));
        }
    }

    /// Commit `paths` (absolute, inside the project) with `message`.
    fn commit_snapshot(&mut self, paths: &[&Path], message: &str) {
        let specs: Vec<String> = paths.iter().filter_map(|p| self.ctx.relative(p)).collect();
        let specs: Vec<&str> = specs.iter().map(String::as_str).collect();

        match git_ops::commit_paths(self.vcs, self.root(), &specs, message) {
            Ok(true) => {}
            Ok(false) => self.warn(format!("nothing to commit for '{}'", message)),
            Err(e) => self.warn(format!("failed to commit '{}': {}", message, e)),
        }
    }

    /// Current branch, or `None` with a warning when it cannot be read.
    fn final_branch(&mut self) -> Option<String> {
        match git_ops::current_branch(self.vcs, self.root()) {
            Ok(branch) => Some(branch),
            Err(e) => {
                self.warn(format!("could not determine current branch: {}", e));
                None
            }
        }
    }
}
