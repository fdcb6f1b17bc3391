//! Step numbering and breakpoint selection.
//!
//! A breakpoint directory holds one folder per step, named `NN-name`. This
//! module scans those folders, computes the next ordinal, and resolves which
//! breakpoint a command applies to.

use crate::error::{BreakpointError, Result};
use crate::naming::{INITIAL_ORDINAL, MAX_ORDINAL, parse_step_folder};
use crate::prompt::Prompter;
use std::fs;
use std::path::{Path, PathBuf};

/// A step folder inside a breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInfo {
    /// Numeric prefix of the folder.
    pub ordinal: u32,

    /// Step name (the folder name after `NN-`).
    pub name: String,

    /// Full folder name, e.g. `02-edit`.
    pub folder: String,

    /// Absolute path to the step folder.
    pub path: PathBuf,
}

impl StepInfo {
    /// True for the first step of a breakpoint.
    pub fn is_initial(&self) -> bool {
        self.ordinal == INITIAL_ORDINAL
    }
}

/// Immediate subdirectories of `dir`, sorted by name. Missing `dir` is empty.
fn subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        BreakpointError::IoError(format!(
            "failed to read directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            BreakpointError::IoError(format!("failed to read directory entry: {}", e))
        })?;

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            dirs.push((name.to_string(), path.clone()));
        }
    }

    dirs.sort();
    Ok(dirs)
}

/// List the step folders of a breakpoint in ordinal order.
///
/// Folders not matching `NN-...` are ignored. Two-digit prefixes make the
/// lexicographic order the numeric order.
pub fn list_steps(breakpoint_dir: &Path) -> Result<Vec<StepInfo>> {
    Ok(subdirectories(breakpoint_dir)?
        .into_iter()
        .filter_map(|(folder, path)| {
            let (ordinal, name) = parse_step_folder(&folder)?;
            let name = name.to_string();
            Some(StepInfo {
                ordinal,
                name,
                folder,
                path,
            })
        })
        .collect())
}

/// Ordinal for the next step: highest existing ordinal + 1, or 2 when the
/// breakpoint has no step folders. Gaps are never filled.
pub fn next_step_ordinal(breakpoint_dir: &Path) -> Result<u32> {
    let next = list_steps(breakpoint_dir)?
        .iter()
        .map(|step| step.ordinal + 1)
        .max()
        .unwrap_or(INITIAL_ORDINAL + 1);

    if next > MAX_ORDINAL {
        return Err(BreakpointError::ValidationError(format!(
            "next step of '{}' would be {}; step numbers stop at {}",
            breakpoint_dir.display(),
            next,
            MAX_ORDINAL
        )));
    }

    Ok(next)
}

/// Names of all breakpoints, sorted. Hidden directories are skipped.
pub fn list_breakpoints(breakpoints_dir: &Path) -> Result<Vec<String>> {
    Ok(subdirectories(breakpoints_dir)?
        .into_iter()
        .map(|(name, _)| name)
        .filter(|name| !name.starts_with('.'))
        .collect())
}

/// Decide which breakpoint a command applies to.
///
/// An explicit name must exist. Without one, a single breakpoint is chosen
/// automatically and several are offered to the prompter.
pub fn select_breakpoint(
    breakpoints_dir: &Path,
    explicit: Option<&str>,
    prompter: &mut dyn Prompter,
) -> Result<String> {
    let available = list_breakpoints(breakpoints_dir)?;

    if let Some(name) = explicit {
        let name = name.trim();
        if available.iter().any(|b| b == name) {
            return Ok(name.to_string());
        }
        let known = if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        };
        return Err(BreakpointError::UserError(format!(
            "breakpoint '{}' not found (available: {})",
            name, known
        )));
    }

    match available.len() {
        0 => Err(BreakpointError::NoBreakpoints(breakpoints_dir.to_path_buf())),
        1 => Ok(available[0].clone()),
        _ => {
            let choice = prompter.select("Select a breakpoint", &available)?;
            match choice {
                Some(name) if available.contains(&name) => Ok(name),
                Some(name) => Err(BreakpointError::ValidationError(format!(
                    "'{}' is not one of the available breakpoints",
                    name
                ))),
                None => Err(BreakpointError::ValidationError(
                    "no breakpoint selected".to_string(),
                )),
            }
        }
    }
}
