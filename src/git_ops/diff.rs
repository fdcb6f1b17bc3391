//! Change-set queries.

use crate::error::Result;
use crate::git::Vcs;
use std::path::Path;

/// Files touched by HEAD's own commit, relative to `root`.
///
/// Compares HEAD against its first parent; for a root commit every file of
/// HEAD is listed. When `root` is below the repository toplevel, changes
/// outside it are left out. Deleted files are included (callers skip what no longer
/// exists on disk).
pub fn head_changed_files(vcs: &dyn Vcs, root: &Path) -> Result<Vec<String>> {
    let output = vcs.run(
        root,
        &[
            "diff-tree",
            "-r",
            "--root",
            "--no-commit-id",
            "--name-only",
            "-z",
            "--relative",
            "HEAD",
        ],
    )?;

    Ok(output
        .stdout
        .split('\0')
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitCli;
    use crate::test_support::{FakeVcs, create_test_repo, git};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_root_commit_lists_all_files() {
        let repo = create_test_repo();
        let files = head_changed_files(&GitCli, repo.path()).unwrap();
        assert_eq!(files, vec!["README.md".to_string()]);
    }

    #[test]
    fn test_lists_only_files_of_last_commit() {
        let repo = create_test_repo();
        fs::create_dir_all(repo.path().join("src")).unwrap();
        fs::write(repo.path().join("src/lib.rs"), "// lib").unwrap();
        fs::write(repo.path().join("a b.txt"), "spaces").unwrap();
        git(repo.path(), &["add", "-A"]);
        git(repo.path(), &["commit", "-m", "second"]);

        let mut files = head_changed_files(&GitCli, repo.path()).unwrap();
        files.sort();

        assert_eq!(files, vec!["a b.txt".to_string(), "src/lib.rs".to_string()]);
    }

    #[test]
    fn test_includes_deleted_files() {
        let repo = create_test_repo();
        git(repo.path(), &["rm", "-q", "README.md"]);
        git(repo.path(), &["commit", "-m", "remove readme"]);

        let files = head_changed_files(&GitCli, repo.path()).unwrap();
        assert_eq!(files, vec!["README.md".to_string()]);
    }

    #[test]
    fn test_paths_are_relative_to_subdirectory() {
        let repo = create_test_repo();
        let project = repo.path().join("project");
        fs::create_dir_all(project.join("lesson")).unwrap();
        fs::write(project.join("lesson/a.txt"), "a").unwrap();
        fs::write(repo.path().join("outside.txt"), "o").unwrap();
        git(repo.path(), &["add", "-A"]);
        git(repo.path(), &["commit", "-m", "second"]);

        let files = head_changed_files(&GitCli, &project).unwrap();

        assert_eq!(files, vec!["lesson/a.txt".to_string()]);
    }

    #[test]
    fn test_fails_without_commits() {
        let dir = TempDir::new().unwrap();
        git(dir.path(), &["init"]);
        assert!(head_changed_files(&GitCli, dir.path()).is_err());
    }

    #[test]
    fn test_parses_nul_separated_output() {
        let vcs = FakeVcs::on_branch("x").respond("diff-tree", "a.txt\0dir/b.txt\0");
        let files = head_changed_files(&vcs, Path::new("/fake")).unwrap();
        assert_eq!(files, vec!["a.txt".to_string(), "dir/b.txt".to_string()]);
    }
}
