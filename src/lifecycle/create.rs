//! Create a breakpoint: initial snapshot plus breakpoint branch.

use super::snapshot::SnapshotFilter;
use super::{BreakpointState, Lifecycle};
use crate::error::{BreakpointError, Result};
use crate::events::{Event, EventAction};
use crate::fs::{copy_tree, create_dir_all, remove_tree};
use crate::git_ops;
use crate::naming::{NameKind, initial_step_folder};
use serde_json::json;
use std::path::{Path, PathBuf};

const AUTO_COMMIT_MESSAGE: &str = "Auto-commit before creating breakpoint";
const CREATED_MESSAGE: &str = "created breakpoint";

/// Result of creating a breakpoint.
#[derive(Debug)]
pub struct CreateOutcome {
    pub name: String,
    /// The `01-initial` folder.
    pub snapshot_dir: PathBuf,
    pub files_copied: usize,
    /// Whether the folder was replaced after confirmation.
    pub replaced: bool,
    pub version_control: bool,
    pub final_branch: Option<String>,
    pub warnings: Vec<String>,
}

impl Lifecycle<'_> {
    /// Snapshot `folder` into a new breakpoint.
    ///
    /// `assume_yes` pre-accepts replacing an existing breakpoint of the same
    /// name; otherwise the prompter is asked and declining changes nothing.
    pub fn create_breakpoint(
        &mut self,
        folder: &Path,
        name: Option<&str>,
        assume_yes: bool,
    ) -> Result<CreateOutcome> {
        let name = self.resolve_name(name, NameKind::Breakpoint)?;

        if !folder.is_dir() {
            return Err(BreakpointError::UserError(format!(
                "folder '{}' does not exist or is not a directory",
                folder.display()
            )));
        }

        let breakpoint_dir = self.ctx.breakpoint_dir(&name);
        let replaced = BreakpointState::of(self.ctx, &name) == BreakpointState::Active;
        if replaced && !assume_yes {
            let confirmed = self.prompter.confirm(&format!(
                "Breakpoint '{}' already exists. Overwrite it?",
                name
            ))?;
            if !confirmed {
                return Err(BreakpointError::Cancelled(format!(
                    "breakpoint '{}' was left unchanged",
                    name
                )));
            }
        }

        let filter = SnapshotFilter::new(self.ctx)?;

        let version_control = self.vcs.is_repository(self.root());
        if version_control {
            if self.vcs.has_uncommitted_changes(self.root())
                && let Err(e) = git_ops::commit_all(self.vcs, self.root(), AUTO_COMMIT_MESSAGE)
            {
                self.warn(format!("auto-commit failed: {}", e));
            }

            if let Err(e) = git_ops::create_and_checkout(self.vcs, self.root(), &name) {
                self.warn(format!("could not create branch '{}': {}", name, e));
            }
        }

        if replaced {
            remove_tree(&breakpoint_dir)?;
        }
        create_dir_all(&self.ctx.breakpoints_dir)?;

        let snapshot_dir = breakpoint_dir.join(initial_step_folder());
        let files_copied = copy_tree(folder, &snapshot_dir, &filter.as_skip())?;

        self.record(
            Event::new(EventAction::NewBreakpoint)
                .with_breakpoint(&name)
                .with_details(json!({
                    "folder": folder.display().to_string(),
                    "files": files_copied,
                    "replaced": replaced,
                    "version_control": version_control,
                })),
        );

        let final_branch = if version_control {
            let events_file = self.ctx.events_file();
            self.commit_snapshot(&[&breakpoint_dir, &events_file], CREATED_MESSAGE);
            self.final_branch()
        } else {
            None
        };

        Ok(CreateOutcome {
            name,
            snapshot_dir,
            files_copied,
            replaced,
            version_control,
            final_branch,
            warnings: self.take_warnings(),
        })
    }
}
