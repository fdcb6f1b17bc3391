//! Configuration model for breakpoint.
//!
//! This module defines the Config struct that represents the optional
//! `.breakpoint.yaml` at the project root. It supports forward-compatible
//! YAML parsing (unknown fields are ignored), defaults for every field, and
//! validation of config values.

use crate::error::{BreakpointError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// File name of the project configuration, relative to the project root.
pub const CONFIG_FILE_NAME: &str = ".breakpoint.yaml";

/// Configuration for a breakpoint project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Branch that steps are merged back into and that `push-main` pushes.
    #[serde(default = "default_main_branch")]
    pub main_branch: String,

    /// Remote that `push-main` pushes to.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Directory holding all breakpoints, relative to the project root.
    #[serde(default = "default_breakpoints_dir")]
    pub breakpoints_dir: String,

    /// File name of the generated change log inside a breakpoint.
    #[serde(default = "default_change_log_file")]
    pub change_log_file: String,

    /// Glob patterns (relative paths) never copied into snapshots.
    #[serde(default)]
    pub snapshot_exclude: Vec<String>,

    /// Whether to append command events to `<breakpoints_dir>/events.ndjson`.
    #[serde(default = "default_true")]
    pub event_log: bool,
}

fn default_main_branch() -> String {
    "main".to_string()
}
fn default_remote() -> String {
    "origin".to_string()
}
fn default_breakpoints_dir() -> String {
    "breakpoints".to_string()
}
fn default_change_log_file() -> String {
    "change-log.md".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            main_branch: default_main_branch(),
            remote: default_remote(),
            breakpoints_dir: default_breakpoints_dir(),
            change_log_file: default_change_log_file(),
            snapshot_exclude: Vec::new(),
            event_log: default_true(),
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(BreakpointError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            BreakpointError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the config at `path` if present, otherwise the defaults.
    ///
    /// A present but invalid file is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as null, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            BreakpointError::UserError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `main_branch` and `remote` must be non-empty and must not start with '-'
    /// - `breakpoints_dir` must be a non-empty relative path without `..`
    /// - `change_log_file` must be a plain file name
    /// - `snapshot_exclude` entries must be valid glob patterns
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("main_branch", &self.main_branch), ("remote", &self.remote)] {
            if value.trim().is_empty() {
                return Err(BreakpointError::UserError(format!(
                    "config validation failed: {} must not be empty",
                    field
                )));
            }
            if value.starts_with('-') {
                return Err(BreakpointError::UserError(format!(
                    "config validation failed: {} must not start with '-' (found '{}')",
                    field, value
                )));
            }
        }

        let dir = Path::new(&self.breakpoints_dir);
        let dir_ok = dir
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
            && dir.components().any(|c| matches!(c, Component::Normal(_)));
        if !dir_ok {
            return Err(BreakpointError::UserError(format!(
                "config validation failed: breakpoints_dir must be a relative path inside the project (found '{}')",
                self.breakpoints_dir
            )));
        }

        let log = Path::new(&self.change_log_file);
        let log_ok = log.components().count() == 1
            && matches!(log.components().next(), Some(Component::Normal(_)));
        if !log_ok {
            return Err(BreakpointError::UserError(format!(
                "config validation failed: change_log_file must be a plain file name (found '{}')",
                self.change_log_file
            )));
        }

        self.exclude_set()?;

        Ok(())
    }

    /// Compile `snapshot_exclude` into a glob set.
    pub fn exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.snapshot_exclude {
            let glob = Glob::new(pattern).map_err(|e| {
                BreakpointError::UserError(format!(
                    "config validation failed: invalid snapshot_exclude pattern '{}': {}",
                    pattern, e
                ))
            })?;
            builder.add(glob);
        }

        builder.build().map_err(|e| {
            BreakpointError::UserError(format!(
                "config validation failed: invalid snapshot_exclude patterns: {}",
                e
            ))
        })
    }
}
