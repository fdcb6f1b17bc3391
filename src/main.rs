//! Breakpoint: snapshot a project's evolution into numbered steps, kept in
//! sync with git branches, and summarize them in a change log.
//!
//! This is the main entry point for the `breakpoint` CLI. It parses
//! arguments, dispatches to the appropriate command handler, and handles
//! errors with proper exit codes.

mod changelog;
mod cli;
mod commands;
mod config;
mod context;
mod error;
mod events;
mod exit_codes;
mod fs;
mod git;
mod git_ops;
mod lifecycle;
mod naming;
mod prompt;
mod steps;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
