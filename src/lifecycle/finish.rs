//! Finish a breakpoint: write its change log and present it.

use super::Lifecycle;
use crate::changelog::write_change_log;
use crate::error::Result;
use crate::events::{Event, EventAction};
use crate::steps::select_breakpoint;
use serde_json::json;
use std::path::PathBuf;

/// Result of finishing a breakpoint.
#[derive(Debug)]
pub struct FinishOutcome {
    pub breakpoint: String,
    pub change_log: PathBuf,
    pub steps: usize,
    pub files: usize,
    pub warnings: Vec<String>,
}

impl Lifecycle<'_> {
    /// Generate the change log of a breakpoint and hand it to the prompter.
    ///
    /// The breakpoint itself is not modified and nothing is committed.
    pub fn finish_breakpoint(&mut self, breakpoint: Option<&str>) -> Result<FinishOutcome> {
        let breakpoint =
            select_breakpoint(&self.ctx.breakpoints_dir, breakpoint, &mut *self.prompter)?;

        let version_control = self.vcs.is_repository(self.root());
        let (log, change_log) = write_change_log(
            &breakpoint,
            &self.ctx.breakpoint_dir(&breakpoint),
            &self.ctx.change_log_path(&breakpoint),
            version_control,
        )?;

        self.record(
            Event::new(EventAction::FinishBreakpoint)
                .with_breakpoint(&breakpoint)
                .with_details(json!({
                    "steps": log.steps.len(),
                    "files": log.total_files(),
                })),
        );

        self.prompter.open_document(&change_log)?;

        Ok(FinishOutcome {
            breakpoint,
            change_log,
            steps: log.steps.len(),
            files: log.total_files(),
            warnings: self.take_warnings(),
        })
    }
}
