//! Commit operations.

use super::with_hint;
use crate::error::{BreakpointError, Result};
use crate::git::Vcs;
use std::path::Path;

const IDENTITY_HINT: &str = "You may need to configure git user.name and user.email:\n\
                             git config user.name \"Your Name\"\n\
                             git config user.email \"you@example.com\"";

/// Messages git prints when it has no usable committer identity.
const IDENTITY_MARKERS: &[&str] = &["empty ident", "Please tell me who you are"];

/// Attach [`IDENTITY_HINT`] only to failures caused by a missing identity.
fn identity_hint(err: BreakpointError) -> BreakpointError {
    let missing_identity = matches!(
        &err,
        BreakpointError::GitError { message, .. }
            if IDENTITY_MARKERS.iter().any(|m| message.contains(m))
    );
    if missing_identity {
        with_hint(err, IDENTITY_HINT)
    } else {
        err
    }
}

/// Stage everything (`add -A`) and commit it.
pub fn commit_all(vcs: &dyn Vcs, root: &Path, message: &str) -> Result<()> {
    vcs.run(root, &["add", "-A"])?;
    vcs.run(root, &["commit", "-m", message])
        .map_err(identity_hint)?;
    Ok(())
}

/// Stage and commit only `paths` (relative to `root`).
///
/// Paths that do not exist are left out. The commit names exactly the files
/// git reports as staged under `paths`, so an empty directory among them
/// cannot break the pathspec. Returns `Ok(false)` without committing when
/// nothing under `paths` is staged.
pub fn commit_paths(vcs: &dyn Vcs, root: &Path, paths: &[&str], message: &str) -> Result<bool> {
    let existing: Vec<&str> = paths
        .iter()
        .copied()
        .filter(|p| root.join(p).exists())
        .collect();
    if existing.is_empty() {
        return Ok(false);
    }

    let mut add = vec!["add", "--"];
    add.extend(&existing);
    vcs.run(root, &add)?;

    let mut query = vec!["diff", "--cached", "--name-only", "-z", "--relative", "--"];
    query.extend(&existing);
    let output = vcs.run(root, &query)?;
    let staged: Vec<&str> = output.stdout.split('\0').filter(|p| !p.is_empty()).collect();
    if staged.is_empty() {
        return Ok(false);
    }

    let mut commit = vec!["commit", "-m", message, "--"];
    commit.extend(&staged);
    vcs.run(root, &commit).map_err(identity_hint)?;

    Ok(true)
}
