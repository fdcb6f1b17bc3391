//! Add a step: capture changes, commit them, merge the breakpoint back.

use super::Lifecycle;
use super::snapshot::{SnapshotFilter, select_changed, source_dir};
use crate::error::{BreakpointError, Result};
use crate::events::{Event, EventAction};
use crate::fs::{copy_selected, copy_tree};
use crate::git_ops;
use crate::naming::{NameKind, step_folder_name};
use crate::steps::{next_step_ordinal, select_breakpoint};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Result of adding a step.
#[derive(Debug)]
pub struct StepOutcome {
    pub breakpoint: String,
    /// Step folder name, e.g. `02-edit`.
    pub step: String,
    pub step_dir: PathBuf,
    pub files_copied: usize,
    /// True when the whole folder was copied instead of the changed files.
    pub full_copy: bool,
    pub version_control: bool,
    /// Branch checked out when the operation finished.
    pub final_branch: Option<String>,
    pub warnings: Vec<String>,
}

impl Lifecycle<'_> {
    /// Record the next step of a breakpoint.
    ///
    /// Under git the step holds the files changed by HEAD's commit (after
    /// auto-committing pending work); without git it holds a full copy of
    /// `folder`, which is then required.
    pub fn add_step(
        &mut self,
        breakpoint: Option<&str>,
        name: Option<&str>,
        folder: Option<&Path>,
    ) -> Result<StepOutcome> {
        let breakpoint =
            select_breakpoint(&self.ctx.breakpoints_dir, breakpoint, &mut *self.prompter)?;
        let name = self.resolve_name(name, NameKind::Step)?;

        if let Some(folder) = folder
            && !folder.is_dir()
        {
            return Err(BreakpointError::UserError(format!(
                "folder '{}' does not exist or is not a directory",
                folder.display()
            )));
        }

        let version_control = self.vcs.is_repository(self.root());
        if version_control {
            self.switch_to_breakpoint(&breakpoint)?;
        }

        let breakpoint_dir = self.ctx.breakpoint_dir(&breakpoint);
        let ordinal = next_step_ordinal(&breakpoint_dir)?;
        let step = step_folder_name(ordinal, &name);
        let step_dir = breakpoint_dir.join(&step);
        if step_dir.exists() {
            return Err(BreakpointError::DuplicateStep(step));
        }

        let filter = SnapshotFilter::new(self.ctx)?;

        let (files_copied, full_copy) = if version_control {
            self.capture_changes(&filter, &step, &step_dir, folder)?
        } else {
            let Some(folder) = folder else {
                return Err(BreakpointError::GitRequired(format!(
                    "'{}' is not a git repository, so changed files cannot be detected. \
                     Pass --folder <dir> to snapshot a folder in full.",
                    self.root().display()
                )));
            };
            (copy_tree(folder, &step_dir, &filter.as_skip())?, true)
        };

        self.record(
            Event::new(EventAction::AddStep)
                .with_breakpoint(&breakpoint)
                .with_details(json!({
                    "step": step,
                    "files": files_copied,
                    "full_copy": full_copy,
                    "version_control": version_control,
                })),
        );

        let final_branch = if version_control {
            let events_file = self.ctx.events_file();
            self.commit_snapshot(&[&step_dir, &events_file], &step);
            self.merge_back(&breakpoint)
        } else {
            None
        };

        Ok(StepOutcome {
            breakpoint,
            step,
            step_dir,
            files_copied,
            full_copy,
            version_control,
            final_branch,
            warnings: self.take_warnings(),
        })
    }

    /// Make the breakpoint's branch the checked-out one.
    ///
    /// Pending work on another branch is committed there first. A failed
    /// checkout aborts the step; a breakpoint without a branch of its own is
    /// recorded on the current branch with a warning.
    fn switch_to_breakpoint(&mut self, breakpoint: &str) -> Result<()> {
        let current = git_ops::current_branch(self.vcs, self.root())?;
        if current == breakpoint {
            return Ok(());
        }

        if !git_ops::branch_exists(self.vcs, self.root(), breakpoint) {
            self.warn(format!(
                "breakpoint '{}' has no branch; recording the step on '{}'",
                breakpoint, current
            ));
            return Ok(());
        }

        if self.vcs.has_uncommitted_changes(self.root()) {
            let message = format!("Auto-commit before switching to breakpoint {}", breakpoint);
            if let Err(e) = git_ops::commit_all(self.vcs, self.root(), &message) {
                self.warn(format!("auto-commit on '{}' failed: {}", current, e));
            }
        }

        git_ops::checkout(self.vcs, self.root(), breakpoint)?;
        self.warn(format!(
            "switched from branch '{}' to breakpoint branch '{}'",
            current, breakpoint
        ));
        Ok(())
    }

    /// Auto-commit pending work and copy HEAD's changed files into `step_dir`.
    ///
    /// Returns the number of files copied and whether a full copy was made
    /// because the changed files could not be determined.
    fn capture_changes(
        &mut self,
        filter: &SnapshotFilter<'_>,
        step: &str,
        step_dir: &Path,
        folder: Option<&Path>,
    ) -> Result<(usize, bool)> {
        if self.vcs.has_uncommitted_changes(self.root()) {
            let message = format!("Auto-commit changes before creating step {}", step);
            if let Err(e) = git_ops::commit_all(self.vcs, self.root(), &message) {
                self.warn(format!("auto-commit failed: {}", e));
            }
        }

        let source = source_dir(self.ctx, folder);
        let prefix = self.ctx.relative(&source);

        let changed = match (git_ops::head_changed_files(self.vcs, self.root()), prefix) {
            (Ok(changed), Some(prefix)) => select_changed(filter, changed, &prefix),
            (Ok(_), None) => {
                self.warn(format!(
                    "'{}' is outside the repository; copying it in full",
                    source.display()
                ));
                return Ok((copy_tree(&source, step_dir, &filter.as_skip())?, true));
            }
            (Err(e), _) => {
                self.warn(format!(
                    "could not list changed files ({}); copying '{}' in full",
                    e,
                    source.display()
                ));
                return Ok((copy_tree(&source, step_dir, &filter.as_skip())?, true));
            }
        };

        let copied = copy_selected(&source, &changed, step_dir)?;
        Ok((copied.len(), false))
    }

    /// Merge the breakpoint branch into main and return to it.
    ///
    /// Each failure is a warning and nothing is retried. Returns the branch
    /// actually checked out afterwards.
    fn merge_back(&mut self, breakpoint: &str) -> Option<String> {
        let main = self.ctx.config.main_branch.clone();

        match git_ops::checkout(self.vcs, self.root(), &main) {
            Ok(()) => {
                if let Err(e) = git_ops::merge(self.vcs, self.root(), breakpoint) {
                    self.warn(format!(
                        "could not merge '{}' into '{}': {}",
                        breakpoint, main, e
                    ));
                }
            }
            Err(e) => self.warn(format!(
                "could not check out '{}', skipping merge: {}",
                main, e
            )),
        }

        if let Err(e) = git_ops::checkout(self.vcs, self.root(), breakpoint) {
            self.warn(format!(
                "could not return to branch '{}': {}",
                breakpoint, e
            ));
        }

        let branch = self.final_branch()?;
        if branch != breakpoint {
            self.warn(format!(
                "now on branch '{}', not on breakpoint branch '{}'",
                branch, breakpoint
            ));
        }
        Some(branch)
    }
}
