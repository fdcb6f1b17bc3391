//! Command implementations for breakpoint.
//!
//! Each command resolves the project context, drives the lifecycle
//! controller with the real git adapter and a terminal prompter, and prints
//! the outcome. Warnings go to stderr, results to stdout.

mod finish;
mod list;
mod new;
mod push_main;
mod step;


use crate::cli::{Cli, Command};
use crate::context::ProjectContext;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = ProjectContext::resolve(cli.root.as_deref())?;

    match cli.command {
        Command::New(args) => new::cmd_new(&ctx, args),
        Command::Step(args) => step::cmd_step(&ctx, args),
        Command::PushMain => push_main::cmd_push_main(&ctx),
        Command::Finish(args) => finish::cmd_finish(&ctx, args),
        Command::List => list::cmd_list(&ctx),
    }
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

/// Project-relative display form of a path inside the project.
fn display_path(ctx: &ProjectContext, path: &std::path::Path) -> String {
    ctx.relative(path)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| path.display().to_string())
}
