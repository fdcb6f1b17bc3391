//! Branch operations (query, check existence, create, checkout).

use crate::error::Result;
use crate::git::Vcs;
use std::path::Path;

/// Name of the currently checked-out branch (`HEAD` when detached).
pub fn current_branch(vcs: &dyn Vcs, root: &Path) -> Result<String> {
    let output = vcs.run(root, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(output.stdout)
}

/// Check if a branch exists locally.
pub fn branch_exists(vcs: &dyn Vcs, root: &Path, branch: &str) -> bool {
    let reference = format!("refs/heads/{}", branch);
    vcs.run(root, &["rev-parse", "--verify", "--quiet", &reference])
        .is_ok()
}

/// Check out an existing branch.
pub fn checkout(vcs: &dyn Vcs, root: &Path, branch: &str) -> Result<()> {
    vcs.run(root, &["checkout", branch])?;
    Ok(())
}

/// Create `branch` at HEAD and check it out.
///
/// A breakpoint that is re-created keeps its branch: when `checkout -b` fails
/// because the branch already exists, the existing branch is checked out.
pub fn create_and_checkout(vcs: &dyn Vcs, root: &Path, branch: &str) -> Result<()> {
    match vcs.run(root, &["checkout", "-b", branch]) {
        Ok(_) => Ok(()),
        Err(e) => {
            if branch_exists(vcs, root, branch) {
                checkout(vcs, root, branch)
            } else {
                Err(e)
            }
        }
    }
}
