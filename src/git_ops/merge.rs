//! Merge and push operations.

use super::with_hint;
use crate::error::Result;
use crate::git::Vcs;
use std::path::Path;

/// Merge `branch` into the current branch.
///
/// On failure a best-effort `merge --abort` runs so the working tree is not
/// left mid-merge; the merge error is returned either way.
pub fn merge(vcs: &dyn Vcs, root: &Path, branch: &str) -> Result<()> {
    if let Err(e) = vcs.run(root, &["merge", "--no-edit", branch]) {
        let _ = vcs.run(root, &["merge", "--abort"]);
        return Err(with_hint(
            e,
            &format!(
                "The merge was aborted. You can merge manually with:\n\
                 git merge {}",
                branch
            ),
        ));
    }
    Ok(())
}

/// Push `branch` to `remote`.
pub fn push(vcs: &dyn Vcs, root: &Path, remote: &str, branch: &str) -> Result<()> {
    vcs.run(root, &["push", remote, branch]).map_err(|e| {
        with_hint(
            e,
            &format!("You can push manually with:\ngit push {} {}", remote, branch),
        )
    })?;
    Ok(())
}
