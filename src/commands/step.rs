//! Implementation of the `breakpoint step` command.

use super::{display_path, print_warnings};
use crate::cli::StepArgs;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::git::GitCli;
use crate::lifecycle::Lifecycle;
use crate::prompt::TerminalPrompter;

/// Execute the `breakpoint step` command.
pub fn cmd_step(ctx: &ProjectContext, args: StepArgs) -> Result<()> {
    let folder = match &args.folder {
        Some(folder) => Some(ctx.resolve_folder(folder)?),
        None => None,
    };
    let mut prompter = TerminalPrompter::stdio();

    let outcome = Lifecycle::new(ctx, &GitCli, &mut prompter).add_step(
        args.breakpoint.as_deref(),
        args.name.as_deref(),
        folder.as_deref(),
    )?;

    print_warnings(&outcome.warnings);

    let kind = if outcome.full_copy {
        "full copy"
    } else {
        "changed files"
    };

    println!();
    println!("Added step: {} to breakpoint {}", outcome.step, outcome.breakpoint);
    println!(
        "  Snapshot: {} ({} files, {})",
        display_path(ctx, &outcome.step_dir),
        outcome.files_copied,
        kind
    );
    if let Some(branch) = &outcome.final_branch {
        println!("  Now on branch: {}", branch);
    } else if !outcome.version_control {
        println!("  Git: not a repository, nothing committed");
    }

    Ok(())
}
