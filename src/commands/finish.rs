//! Implementation of the `breakpoint finish` command.

use super::{display_path, print_warnings};
use crate::cli::FinishArgs;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::git::GitCli;
use crate::lifecycle::Lifecycle;
use crate::prompt::TerminalPrompter;

/// Execute the `breakpoint finish` command.
///
/// The change log is printed through the prompter; `--quiet` prints only
/// its path.
pub fn cmd_finish(ctx: &ProjectContext, args: FinishArgs) -> Result<()> {
    let mut prompter = TerminalPrompter::stdio();
    prompter.show_documents = !args.quiet;

    let outcome =
        Lifecycle::new(ctx, &GitCli, &mut prompter).finish_breakpoint(args.breakpoint.as_deref())?;

    print_warnings(&outcome.warnings);

    if !args.quiet {
        println!(
            "Finished breakpoint {}: {} steps, {} files",
            outcome.breakpoint, outcome.steps, outcome.files
        );
        println!("  Change log: {}", display_path(ctx, &outcome.change_log));
    }

    Ok(())
}
