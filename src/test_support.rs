use crate::error::{BreakpointError, Result};
use crate::git::{GitOutput, Vcs};
use crate::prompt::Prompter;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A repository on `main` with one commit containing `README.md`.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Ensure the repo uses a deterministic default branch name across environments.
    // This sets HEAD to an unborn `main` branch before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

/// A test repository plus a bare repository registered as its `origin`.
pub(crate) fn create_test_repo_with_remote() -> (TempDir, TempDir) {
    let repo = create_test_repo();
    let remote = TempDir::new().unwrap();

    git(remote.path(), &["init", "--bare"]);
    let remote_str = remote.path().to_string_lossy().to_string();
    git(repo.path(), &["remote", "add", "origin", &remote_str]);

    (repo, remote)
}

/// Current branch of a real repository.
pub(crate) fn current_branch(repo_dir: &Path) -> String {
    git_stdout(repo_dir, &["rev-parse", "--abbrev-ref", "HEAD"])
}

pub(crate) fn git_stdout(repo_dir: &Path, args: &[&str]) -> String {
    let output = git(repo_dir, args);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) -> std::process::Output {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }

    output
}

/// Scripted stand-in for git.
///
/// Records every command, tracks the checked-out branch across `checkout`
/// calls, and fails any command whose joined arguments start with a
/// registered prefix.
pub(crate) struct FakeVcs {
    pub(crate) calls: RefCell<Vec<String>>,
    branch: RefCell<String>,
    failures: Vec<(String, String)>,
    responses: Vec<(String, String)>,
    repository: bool,
    dirty: bool,
}

impl FakeVcs {
    pub(crate) fn on_branch(branch: &str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            branch: RefCell::new(branch.to_string()),
            failures: Vec::new(),
            responses: Vec::new(),
            repository: true,
            dirty: false,
        }
    }

    pub(crate) fn not_a_repository() -> Self {
        Self {
            repository: false,
            ..Self::on_branch("main")
        }
    }

    pub(crate) fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub(crate) fn fail_on(mut self, prefix: &str, message: &str) -> Self {
        self.failures.push((prefix.to_string(), message.to_string()));
        self
    }

    pub(crate) fn respond(mut self, prefix: &str, stdout: &str) -> Self {
        self.responses.push((prefix.to_string(), stdout.to_string()));
        self
    }

    pub(crate) fn branch(&self) -> String {
        self.branch.borrow().clone()
    }

    pub(crate) fn ran(&self, command: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == command)
    }

    pub(crate) fn position(&self, command: &str) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c == command)
    }
}

impl Vcs for FakeVcs {
    fn run(&self, _root: &Path, args: &[&str]) -> Result<GitOutput> {
        let joined = args.join(" ");
        self.calls.borrow_mut().push(joined.clone());

        if !self.repository {
            return Err(BreakpointError::git(args, "not a git repository"));
        }

        if let Some((_, message)) = self.failures.iter().find(|(p, _)| joined.starts_with(p)) {
            return Err(BreakpointError::git(args, message.clone()));
        }

        match args {
            ["checkout", "-b", name] | ["checkout", name] => {
                *self.branch.borrow_mut() = name.to_string();
            }
            ["rev-parse", "--abbrev-ref", "HEAD"] => {
                return Ok(output(self.branch()));
            }
            ["status", "--porcelain"] if self.dirty => {
                return Ok(output("?? new.txt"));
            }
            _ => {}
        }

        if let Some((_, stdout)) = self.responses.iter().find(|(p, _)| joined.starts_with(p)) {
            return Ok(output(stdout.clone()));
        }

        Ok(GitOutput::default())
    }
}

fn output(stdout: impl Into<String>) -> GitOutput {
    GitOutput {
        stdout: stdout.into(),
        stderr: String::new(),
    }
}

/// Prompter that replays canned answers and records what it was asked.
#[derive(Default)]
pub(crate) struct ScriptedPrompter {
    inputs: VecDeque<Option<String>>,
    confirms: VecDeque<bool>,
    selections: VecDeque<Option<String>>,
    pub(crate) asked: Vec<String>,
    pub(crate) opened: Vec<PathBuf>,
}

impl ScriptedPrompter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_input(mut self, answer: &str) -> Self {
        self.inputs.push_back(Some(answer.to_string()));
        self
    }

    pub(crate) fn with_cancelled_input(mut self) -> Self {
        self.inputs.push_back(None);
        self
    }

    pub(crate) fn with_confirm(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    pub(crate) fn with_selection(mut self, answer: &str) -> Self {
        self.selections.push_back(Some(answer.to_string()));
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> Result<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.inputs.pop_front().flatten())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.asked.push(prompt.to_string());
        Ok(self.confirms.pop_front().unwrap_or(false))
    }

    fn select(&mut self, prompt: &str, _options: &[String]) -> Result<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.selections.pop_front().flatten())
    }

    fn open_document(&mut self, path: &Path) -> Result<()> {
        self.opened.push(path.to_path_buf());
        Ok(())
    }
}
