//! Implementation of the `breakpoint new` command.

use super::{display_path, print_warnings};
use crate::cli::NewArgs;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::git::GitCli;
use crate::lifecycle::Lifecycle;
use crate::prompt::TerminalPrompter;

/// Execute the `breakpoint new` command.
pub fn cmd_new(ctx: &ProjectContext, args: NewArgs) -> Result<()> {
    let folder = ctx.resolve_folder(&args.folder)?;
    let mut prompter = TerminalPrompter::stdio();

    let outcome = Lifecycle::new(ctx, &GitCli, &mut prompter).create_breakpoint(
        &folder,
        args.name.as_deref(),
        args.yes,
    )?;

    print_warnings(&outcome.warnings);

    println!();
    if outcome.replaced {
        println!("Replaced breakpoint: {}", outcome.name);
    } else {
        println!("Created breakpoint: {}", outcome.name);
    }
    println!(
        "  Snapshot: {} ({} files)",
        display_path(ctx, &outcome.snapshot_dir),
        outcome.files_copied
    );
    match &outcome.final_branch {
        Some(branch) => println!("  Branch:   {}", branch),
        None if !outcome.version_control => println!("  Git:      not a repository"),
        None => {}
    }
    println!();
    println!("Next: make changes, then run `breakpoint step`.");

    Ok(())
}
