//! Project context resolution for breakpoint.
//!
//! Finds the project root (an explicit `--root`, otherwise the git toplevel of
//! the current directory, otherwise the current directory itself), loads the
//! project config, and derives every path the commands touch. All paths are
//! absolute.

use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::{BreakpointError, Result};
use crate::git;
use std::env;
use std::path::{Path, PathBuf};

/// Name of the NDJSON event log inside the breakpoints directory.
pub const EVENTS_FILE_NAME: &str = "events.ndjson";

/// Resolved paths and settings for one project.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Absolute path to the project root.
    pub root: PathBuf,

    /// Absolute path to the breakpoints directory (default: `{root}/breakpoints/`).
    pub breakpoints_dir: PathBuf,

    /// Loaded configuration (defaults when no config file exists).
    pub config: Config,
}

impl ProjectContext {
    /// Resolve the context from the current working directory, or from
    /// `explicit_root` when given.
    pub fn resolve(explicit_root: Option<&Path>) -> Result<Self> {
        match explicit_root {
            Some(root) => Self::from_root(root),
            None => {
                let cwd = env::current_dir().map_err(|e| {
                    BreakpointError::NoWorkspace(format!(
                        "failed to get current working directory: {}",
                        e
                    ))
                })?;
                Self::resolve_from(&cwd)
            }
        }
    }

    /// Resolve the context for a directory somewhere inside the project.
    ///
    /// Inside a git repository the project root is the repository toplevel,
    /// so running from a subdirectory still targets the same breakpoints.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Result<Self> {
        let cwd = cwd.as_ref();
        let root = git::get_repo_root(cwd).unwrap_or_else(|| cwd.to_path_buf());
        Self::from_root(root)
    }

    /// Build the context for an exact project root.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();

        if !root.is_dir() {
            return Err(BreakpointError::NoWorkspace(format!(
                "project root '{}' does not exist or is not a directory",
                root.display()
            )));
        }

        let root = root.canonicalize().map_err(|e| {
            BreakpointError::NoWorkspace(format!(
                "failed to resolve project root '{}': {}",
                root.display(),
                e
            ))
        })?;

        let config = Config::load_or_default(root.join(CONFIG_FILE_NAME))?;
        let breakpoints_dir = root.join(&config.breakpoints_dir);

        Ok(Self {
            root,
            breakpoints_dir,
            config,
        })
    }

    /// Path to a breakpoint directory.
    pub fn breakpoint_dir(&self, name: &str) -> PathBuf {
        self.breakpoints_dir.join(name)
    }

    /// Path to the change log of a breakpoint.
    pub fn change_log_path(&self, name: &str) -> PathBuf {
        self.breakpoint_dir(name).join(&self.config.change_log_file)
    }

    /// Path to the event log.
    pub fn events_file(&self) -> PathBuf {
        self.breakpoints_dir.join(EVENTS_FILE_NAME)
    }

    /// Project-relative form of `path` with forward slashes, for git pathspecs.
    ///
    /// Returns `None` when `path` is outside the project root.
    pub fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        Some(parts.join("/"))
    }

    /// Resolve a user-supplied folder against the current directory and
    /// require it to be an existing directory.
    pub fn resolve_folder(&self, folder: &Path) -> Result<PathBuf> {
        let absolute = if folder.is_absolute() {
            folder.to_path_buf()
        } else {
            env::current_dir()
                .map_err(|e| {
                    BreakpointError::NoWorkspace(format!(
                        "failed to get current working directory: {}",
                        e
                    ))
                })?
                .join(folder)
        };

        if !absolute.is_dir() {
            return Err(BreakpointError::UserError(format!(
                "folder '{}' does not exist or is not a directory",
                folder.display()
            )));
        }

        absolute.canonicalize().map_err(|e| {
            BreakpointError::UserError(format!(
                "failed to resolve folder '{}': {}",
                folder.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DirGuard, create_test_repo};
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_from_repo_subdirectory_uses_toplevel() {
        let temp_dir = create_test_repo();
        let subdir = temp_dir.path().join("src").join("nested");
        std::fs::create_dir_all(&subdir).unwrap();

        let ctx = ProjectContext::resolve_from(&subdir).unwrap();

        assert_eq!(ctx.root, temp_dir.path().canonicalize().unwrap());
        assert!(ctx.breakpoints_dir.ends_with("breakpoints"));
    }

    #[test]
    fn test_resolve_outside_repo_uses_directory() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::resolve_from(temp_dir.path()).unwrap();
        assert_eq!(ctx.root, temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_root_is_no_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let err = ProjectContext::from_root(temp_dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, BreakpointError::NoWorkspace(_)));
    }

    #[test]
    fn test_config_relocates_breakpoints_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "breakpoints_dir: snapshots\nchange_log_file: CHANGES.md\n",
        )
        .unwrap();

        let ctx = ProjectContext::from_root(temp_dir.path()).unwrap();

        assert!(ctx.breakpoints_dir.ends_with("snapshots"));
        assert!(ctx.change_log_path("x").ends_with("snapshots/x/CHANGES.md"));
    }

    #[test]
    fn test_paths() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::from_root(temp_dir.path()).unwrap();

        assert!(ctx.breakpoint_dir("x").ends_with("breakpoints/x"));
        assert!(ctx.change_log_path("x").ends_with("breakpoints/x/change-log.md"));
        assert!(ctx.events_file().ends_with("breakpoints/events.ndjson"));
    }

    #[test]
    fn test_relative_uses_forward_slashes() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::from_root(temp_dir.path()).unwrap();

        let inside = ctx.root.join("breakpoints").join("x").join("02-edit");
        assert_eq!(ctx.relative(&inside).unwrap(), "breakpoints/x/02-edit");
        assert_eq!(ctx.relative(&ctx.root).unwrap(), "");
        assert!(ctx.relative(Path::new("/definitely/elsewhere")).is_none());
    }

    #[test]
    #[serial]
    fn test_resolve_uses_current_directory() {
        let temp_dir = create_test_repo();
        let nested = temp_dir.path().join("lessons");
        std::fs::create_dir_all(&nested).unwrap();
        let _guard = DirGuard::new(&nested);

        let ctx = ProjectContext::resolve(None).unwrap();
        assert_eq!(ctx.root, temp_dir.path().canonicalize().unwrap());

        let folder = ctx.resolve_folder(Path::new(".")).unwrap();
        assert_eq!(folder, nested.canonicalize().unwrap());

        let err = ctx.resolve_folder(Path::new("missing")).unwrap_err();
        assert!(matches!(err, BreakpointError::UserError(_)));
    }
}
