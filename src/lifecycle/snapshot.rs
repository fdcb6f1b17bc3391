//! What goes into a snapshot.

use crate::context::ProjectContext;
use crate::error::Result;
use globset::GlobSet;
use std::path::{Path, PathBuf};

/// Decides which paths a snapshot leaves out: the breakpoints directory,
/// `.git`, and anything matching `snapshot_exclude`.
///
/// Exclude globs are matched against project-relative paths (`/`-separated);
/// paths outside the project are matched as given.
pub(super) struct SnapshotFilter<'a> {
    ctx: &'a ProjectContext,
    breakpoints_prefix: Option<String>,
    excludes: GlobSet,
}

impl<'a> SnapshotFilter<'a> {
    pub(super) fn new(ctx: &'a ProjectContext) -> Result<Self> {
        Ok(Self {
            ctx,
            breakpoints_prefix: ctx.relative(&ctx.breakpoints_dir),
            excludes: ctx.config.exclude_set()?,
        })
    }

    /// Filter for absolute paths met while walking a directory.
    pub(super) fn skips_path(&self, path: &Path) -> bool {
        if path.starts_with(&self.ctx.breakpoints_dir) {
            return true;
        }
        if path.file_name().is_some_and(|n| n == ".git") {
            return true;
        }

        match self.ctx.relative(path) {
            Some(relative) => self.excludes.is_match(relative.as_str()),
            None => self.excludes.is_match(path),
        }
    }

    /// Filter for project-relative paths reported by git.
    pub(super) fn skips_relative(&self, relative: &str) -> bool {
        if let Some(prefix) = &self.breakpoints_prefix
            && (relative == prefix || relative.starts_with(&format!("{}/", prefix)))
        {
            return true;
        }
        if relative == ".git" || relative.starts_with(".git/") {
            return true;
        }
        self.excludes.is_match(relative)
    }

    /// Walk filter as a closure for [`crate::fs::copy_tree`].
    pub(super) fn as_skip(&self) -> impl Fn(&Path) -> bool + '_ {
        move |path: &Path| self.skips_path(path)
    }
}

/// Keep the changed files that belong in a step and make them relative to
/// the copy source.
///
/// With `folder_prefix` (project-relative folder, empty for the root) only
/// files under it are kept, with the prefix removed.
pub(super) fn select_changed(
    filter: &SnapshotFilter<'_>,
    changed: Vec<String>,
    folder_prefix: &str,
) -> Vec<String> {
    changed
        .into_iter()
        .filter(|path| !filter.skips_relative(path))
        .filter_map(|path| {
            if folder_prefix.is_empty() {
                Some(path)
            } else {
                path.strip_prefix(&format!("{}/", folder_prefix))
                    .map(str::to_string)
            }
        })
        .collect()
}

/// Absolute copy source for a step: the given folder or the project root.
pub(super) fn source_dir(ctx: &ProjectContext, folder: Option<&Path>) -> PathBuf {
    folder.map_or_else(|| ctx.root.clone(), Path::to_path_buf)
}
