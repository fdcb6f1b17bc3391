//! Atomic file writes.
//!
//! Generated documents (the change log) are written to a temporary file in
//! the same directory, synced, then renamed over the target, so readers never
//! observe a half-written log. `std::fs::rename` replaces an existing target
//! on both POSIX and Windows.
//!
//! On crash a temporary `.{filename}.tmp` may remain next to the target.

use crate::error::{BreakpointError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            BreakpointError::IoError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BreakpointError::IoError(format!("failed to replace '{}': {}", path.display(), e))
    })?;

    sync_parent_dir(path);
    Ok(())
}

/// Persist the renamed directory entry (best-effort).
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        BreakpointError::IoError(format!("invalid file path '{}'", target.display()))
    })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        BreakpointError::IoError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            BreakpointError::IoError(format!(
                "failed to write temporary file '{}': {}",
                path.display(),
                e
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("change-log.md");

        atomic_write_file(&file_path, "# Change Log\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "# Change Log\n");
    }

    #[test]
    fn test_atomic_write_replaces_existing_fully() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("change-log.md");
        fs::write(&file_path, "a much longer previous log that must disappear").unwrap();

        atomic_write(&file_path, b"short").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "short");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("breakpoints").join("x").join("log.md");

        atomic_write(&file_path, b"nested").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "nested");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        atomic_write(&file_path, b"content").unwrap();

        assert!(!temp_dir.path().join(".test.txt.tmp").exists());
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let temp = temp_path_for(Path::new("/some/path/file.txt")).unwrap();
        assert_eq!(temp, Path::new("/some/path/.file.txt.tmp"));
    }
}
