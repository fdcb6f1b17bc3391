//! Change-log generation for a finished breakpoint.
//!
//! Walks the step folders of a breakpoint, groups each step's files by their
//! parent directory and renders a Markdown document. The document is derived
//! entirely from the folders on disk, so regenerating overwrites it.

use crate::error::Result;
use crate::fs::{atomic_write_file, list_files_recursive};
use crate::naming::step_label;
use crate::steps::{StepInfo, list_steps};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Heading used for files that sit directly in a step folder.
pub const ROOT_GROUP: &str = "Root";

/// Files of one step, grouped by parent directory.
#[derive(Debug, Clone)]
pub struct StepSummary {
    pub folder: String,
    pub note: String,
    /// Parent directory (relative, `/`-separated; empty for the step root)
    /// to sorted file names.
    pub groups: BTreeMap<String, Vec<String>>,
}

impl StepSummary {
    fn from_step(step: &StepInfo) -> Result<Self> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for file in list_files_recursive(&step.path)? {
            let Ok(relative) = file.strip_prefix(&step.path) else {
                continue;
            };
            let Some(name) = relative.file_name() else {
                continue;
            };

            let parent = relative
                .parent()
                .map(|p| {
                    p.components()
                        .map(|c| c.as_os_str().to_string_lossy().to_string())
                        .collect::<Vec<_>>()
                        .join("/")
                })
                .unwrap_or_default();

            groups
                .entry(parent)
                .or_default()
                .push(name.to_string_lossy().to_string());
        }

        for names in groups.values_mut() {
            names.sort();
        }

        let note = if step.is_initial() {
            "Initial snapshot of the project".to_string()
        } else {
            format!("Changes: {}", step_label(&step.name))
        };

        Ok(Self {
            folder: step.folder.clone(),
            note,
            groups,
        })
    }

    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Change log of one breakpoint.
#[derive(Debug, Clone)]
pub struct ChangeLog {
    pub breakpoint: String,
    pub generated_at: DateTime<Utc>,
    pub steps: Vec<StepSummary>,
    pub version_control: bool,
}

impl ChangeLog {
    /// Collect the step summaries of the breakpoint at `breakpoint_dir`.
    pub fn collect(
        breakpoint: &str,
        breakpoint_dir: &Path,
        version_control: bool,
        generated_at: DateTime<Utc>,
    ) -> Result<Self> {
        let steps = list_steps(breakpoint_dir)?
            .iter()
            .map(StepSummary::from_step)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            breakpoint: breakpoint.to_string(),
            generated_at,
            steps,
            version_control,
        })
    }

    pub fn total_files(&self) -> usize {
        self.steps.iter().map(StepSummary::file_count).sum()
    }

    /// Render the Markdown document.
    pub fn render(&self) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "# Change Log: {}", self.breakpoint);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );

        for step in &self.steps {
            let _ = writeln!(out);
            let _ = writeln!(out, "## {}", step.folder);
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", step.note);
            let _ = writeln!(out);
            let _ = writeln!(out, "Files: {}", step.file_count());

            for (dir, names) in &step.groups {
                let heading = if dir.is_empty() { ROOT_GROUP } else { dir };
                let _ = writeln!(out);
                let _ = writeln!(out, "### {}", heading);
                let _ = writeln!(out);
                for name in names {
                    let _ = writeln!(out, "- {}", name);
                }
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "## Summary");
        let _ = writeln!(out);
        let _ = writeln!(out, "- Total steps: {}", self.steps.len());
        let _ = writeln!(out, "- Total files: {}", self.total_files());
        let _ = writeln!(
            out,
            "- Version control: {}",
            if self.version_control {
                "active"
            } else {
                "inactive"
            }
        );

        out
    }
}

/// Generate the change log of a breakpoint and write it to `path`.
pub fn write_change_log(
    breakpoint: &str,
    breakpoint_dir: &Path,
    path: &Path,
    version_control: bool,
) -> Result<(ChangeLog, PathBuf)> {
    let log = ChangeLog::collect(breakpoint, breakpoint_dir, version_control, Utc::now())?;
    atomic_write_file(path, &log.render())?;
    Ok((log, path.to_path_buf()))
}
