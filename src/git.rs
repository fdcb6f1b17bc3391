//! Git command runner for breakpoint.
//!
//! Provides the version-control adapter: a safe wrapper around git commands
//! with captured stdout/stderr and structured error handling. Commands are
//! always passed as argument lists, never through a shell, so breakpoint and
//! step names cannot inject anything.
//!
//! The lifecycle controller only talks to git through the [`Vcs`] trait so
//! tests can substitute a scripted adapter.

use crate::error::{BreakpointError, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    /// Create a new GitOutput from raw output bytes.
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }
}

/// Version-control adapter used by the lifecycle controller.
///
/// Implementations must not retry: a failed command surfaces immediately and
/// the caller decides whether to continue in degraded mode or abort.
pub trait Vcs {
    /// Run a git command (arguments without the `git` prefix) in `root`.
    fn run(&self, root: &Path, args: &[&str]) -> Result<GitOutput>;

    /// True iff `root` is inside a git repository. Never fails.
    fn is_repository(&self, root: &Path) -> bool {
        self.run(root, &["rev-parse", "--git-dir"]).is_ok()
    }

    /// True iff the working tree has staged, unstaged or untracked changes.
    ///
    /// A failing status query is read as "no uncommitted changes".
    fn has_uncommitted_changes(&self, root: &Path) -> bool {
        self.run(root, &["status", "--porcelain"])
            .map(|output| !output.is_empty())
            .unwrap_or(false)
    }
}

/// The real adapter, backed by the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl Vcs for GitCli {
    fn run(&self, root: &Path, args: &[&str]) -> Result<GitOutput> {
        run_git(root, args)
    }
}

/// Run a git command with the specified working directory.
///
/// # Arguments
///
/// * `cwd` - The working directory to run the command in
/// * `args` - The git command arguments (without "git" prefix)
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(BreakpointError::GitError)` - On spawn failure or non-zero exit
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            BreakpointError::git(args, format!("failed to execute git (is git installed?): {}", e))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };

        Err(BreakpointError::git(
            args,
            format!("exit code {}: {}", exit_code, error_msg),
        ))
    }
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// Returns `None` when `cwd` is not inside a repository.
pub fn get_repo_root<P: AsRef<Path>>(cwd: P) -> Option<std::path::PathBuf> {
    run_git(cwd, &["rev-parse", "--show-toplevel"])
        .ok()
        .filter(|output| !output.is_empty())
        .map(|output| std::path::PathBuf::from(output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_repo;
    use tempfile::TempDir;

    #[test]
    fn test_run_git_success() {
        let temp_dir = create_test_repo();
        let result = run_git(temp_dir.path(), &["status", "--porcelain"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_git_failure_returns_git_error() {
        let temp_dir = create_test_repo();
        let err = run_git(temp_dir.path(), &["checkout", "nonexistent-branch"]).unwrap_err();
        match err {
            BreakpointError::GitError { command, message } => {
                assert_eq!(command, "checkout nonexistent-branch");
                assert!(!message.is_empty());
            }
            other => panic!("expected GitError, got {:?}", other),
        }
    }

    #[test]
    fn test_is_repository() {
        let repo = create_test_repo();
        assert!(GitCli.is_repository(repo.path()));

        let plain = TempDir::new().unwrap();
        assert!(!GitCli.is_repository(plain.path()));
    }

    #[test]
    fn test_has_uncommitted_changes_clean_repo() {
        let temp_dir = create_test_repo();
        assert!(!GitCli.has_uncommitted_changes(temp_dir.path()));
    }

    #[test]
    fn test_has_uncommitted_changes_counts_untracked_files() {
        let temp_dir = create_test_repo();
        std::fs::write(temp_dir.path().join("new.txt"), "new\n").unwrap();
        assert!(GitCli.has_uncommitted_changes(temp_dir.path()));
    }

    #[test]
    fn test_has_uncommitted_changes_outside_repo_is_false() {
        let plain = TempDir::new().unwrap();
        std::fs::write(plain.path().join("a.txt"), "a").unwrap();
        assert!(!GitCli.has_uncommitted_changes(plain.path()));
    }

    #[test]
    fn test_get_repo_root_from_subdirectory() {
        let temp_dir = create_test_repo();
        let subdir = temp_dir.path().join("subdir").join("nested");
        std::fs::create_dir_all(&subdir).unwrap();

        let root = get_repo_root(&subdir).unwrap();
        let expected = temp_dir.path().canonicalize().unwrap();
        assert_eq!(root.canonicalize().unwrap(), expected);
    }

    #[test]
    fn test_get_repo_root_outside_repo() {
        let temp_dir = TempDir::new().unwrap();
        assert!(get_repo_root(temp_dir.path()).is_none());
    }
}
