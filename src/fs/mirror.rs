//! Directory mirroring for step snapshots.
//!
//! Walks use `walkdir` without following symlinks: a link is recreated as a
//! link, never descended into. A failed entry aborts the remaining copy and
//! leaves the destination partially populated; callers do not attempt
//! cleanup.

use crate::error::{BreakpointError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively copy `source` into `destination`, creating it if needed and
/// skipping every entry (file or directory) for which `skip` returns true.
///
/// Returns the number of regular files copied.
pub fn copy_tree<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    skip: &dyn Fn(&Path) -> bool,
) -> Result<usize> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    create_dir_all(destination)?;

    let walker = WalkDir::new(source)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !skip(entry.path()));

    let mut copied = 0;
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(source, e))?;
        if entry.depth() == 0 {
            continue;
        }

        let relative = entry.path().strip_prefix(source).map_err(|e| {
            BreakpointError::IoError(format!(
                "'{}' is not under '{}': {}",
                entry.path().display(),
                source.display(),
                e
            ))
        })?;
        let target = destination.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// List every regular file under `dir`, depth-first, as absolute paths.
///
/// Symlinks are not followed. A missing directory yields an empty list.
pub fn list_files_recursive<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn walk_error(root: &Path, e: walkdir::Error) -> BreakpointError {
    let path = e.path().unwrap_or(root).display().to_string();
    BreakpointError::IoError(format!("failed to read '{}': {}", path, e))
}

#[cfg(unix)]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    use std::os::unix::fs::symlink;

    if let Some(parent) = target.parent() {
        create_dir_all(parent)?;
    }

    let link = fs::read_link(source).map_err(|e| {
        BreakpointError::IoError(format!(
            "failed to read symlink '{}': {}",
            source.display(),
            e
        ))
    })?;

    symlink(&link, target).map_err(|e| {
        BreakpointError::IoError(format!(
            "failed to create symlink '{}' -> '{}': {}",
            target.display(),
            link.display(),
            e
        ))
    })
}

#[cfg(not(unix))]
fn copy_symlink(_source: &Path, _target: &Path) -> Result<()> {
    Ok(())
}

/// Copy the listed `root`-relative files into `destination`, keeping their
/// relative layout.
///
/// Paths whose source no longer exists (deleted files) are skipped; a step
/// snapshot records the surviving state. Returns the relative paths that were
/// actually copied.
pub fn copy_selected<P: AsRef<Path>, Q: AsRef<Path>>(
    root: P,
    relative_paths: &[String],
    destination: Q,
) -> Result<Vec<String>> {
    let root = root.as_ref();
    let destination = destination.as_ref();

    create_dir_all(destination)?;

    let mut copied = Vec::new();
    for relative in relative_paths {
        let source = root.join(relative);
        if !source.is_file() {
            continue;
        }

        copy_file(&source, &destination.join(relative))?;
        copied.push(relative.clone());
    }

    Ok(copied)
}

/// Recursively delete `dir` if it exists.
pub fn remove_tree<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(());
    }

    fs::remove_dir_all(dir).map_err(|e| {
        BreakpointError::IoError(format!("failed to remove '{}': {}", dir.display(), e))
    })
}

/// `create_dir_all` with a descriptive error.
pub fn create_dir_all<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| {
        BreakpointError::IoError(format!(
            "failed to create directory '{}': {}",
            dir.display(),
            e
        ))
    })
}

fn copy_file(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        create_dir_all(parent)?;
    }

    fs::copy(source, target).map_err(|e| {
        BreakpointError::IoError(format!(
            "failed to copy '{}' to '{}': {}",
            source.display(),
            target.display(),
            e
        ))
    })?;

    Ok(())
}
