//! CLI argument parsing for breakpoint.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Breakpoint: snapshot a project's evolution into numbered steps.
///
/// A breakpoint is a directory of step snapshots under `breakpoints/`:
/// - `01-initial` holds a full copy of the chosen folder
/// - later steps hold the files changed since the previous step
/// - inside a git repository each breakpoint gets its own branch, merged
///   back into main after every step
#[derive(Parser, Debug)]
#[command(name = "breakpoint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root (default: the git toplevel of the current directory,
    /// or the current directory outside git).
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for breakpoint.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a breakpoint from a folder.
    ///
    /// Copies the folder into `breakpoints/<name>/01-initial/`. Inside git,
    /// pending changes are auto-committed first and a branch named after the
    /// breakpoint is created and checked out.
    New(NewArgs),

    /// Add the next step to a breakpoint.
    ///
    /// Inside git, pending changes are auto-committed and the files changed by
    /// that commit are copied into `NN-<name>/`; the breakpoint branch is then
    /// merged into main. Outside git the whole `--folder` is copied.
    Step(StepArgs),

    /// Push the main branch to the configured remote.
    ///
    /// Returns to the previously checked-out branch afterwards.
    PushMain,

    /// Generate the change log of a breakpoint.
    ///
    /// Writes `change-log.md` into the breakpoint directory and prints it.
    Finish(FinishArgs),

    /// List breakpoints and their steps.
    List,
}

/// Arguments for the `new` command.
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Folder to snapshot.
    pub folder: PathBuf,

    /// Breakpoint name (prompted for when omitted).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Replace an existing breakpoint of the same name without asking.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `step` command.
#[derive(Parser, Debug)]
pub struct StepArgs {
    /// Breakpoint to add the step to (selected interactively when several exist).
    #[arg(short, long)]
    pub breakpoint: Option<String>,

    /// Step name (prompted for when omitted).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Folder to capture. Required outside a git repository.
    #[arg(short, long)]
    pub folder: Option<PathBuf>,
}

/// Arguments for the `finish` command.
#[derive(Parser, Debug)]
pub struct FinishArgs {
    /// Breakpoint to finish (selected interactively when several exist).
    #[arg(short, long)]
    pub breakpoint: Option<String>,

    /// Print only the path of the change log.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
