//! Implementation of the `breakpoint push-main` command.

use super::print_warnings;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::git::GitCli;
use crate::lifecycle::Lifecycle;
use crate::prompt::TerminalPrompter;

/// Execute the `breakpoint push-main` command.
pub fn cmd_push_main(ctx: &ProjectContext) -> Result<()> {
    let mut prompter = TerminalPrompter::stdio();
    let outcome = Lifecycle::new(ctx, &GitCli, &mut prompter).push_main()?;

    print_warnings(&outcome.warnings);

    println!("Pushed {} to {}", outcome.branch, outcome.remote);
    println!("  Now on branch: {}", outcome.final_branch);

    Ok(())
}
