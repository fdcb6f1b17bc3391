//! Implementation of the `breakpoint list` command.

use super::display_path;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::events::read_events;
use crate::git::{GitCli, Vcs};
use crate::git_ops;
use crate::steps::{StepInfo, list_breakpoints, list_steps};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One breakpoint as shown by `list`.
#[derive(Debug)]
pub(super) struct BreakpointListing {
    pub(super) name: String,
    pub(super) steps: Vec<StepInfo>,
    pub(super) has_change_log: bool,
    pub(super) current: bool,
    /// Timestamp of the newest logged event for this breakpoint.
    pub(super) last_activity: Option<DateTime<Utc>>,
}

/// Collect every breakpoint with its steps.
pub(super) fn collect(ctx: &ProjectContext, vcs: &dyn Vcs) -> Result<Vec<BreakpointListing>> {
    let current_branch = if vcs.is_repository(&ctx.root) {
        git_ops::current_branch(vcs, &ctx.root).ok()
    } else {
        None
    };

    let mut last_activity: HashMap<String, DateTime<Utc>> = HashMap::new();
    for event in read_events(ctx)? {
        if let Some(name) = event.breakpoint {
            let latest = last_activity.entry(name).or_insert(event.ts);
            if event.ts > *latest {
                *latest = event.ts;
            }
        }
    }

    list_breakpoints(&ctx.breakpoints_dir)?
        .into_iter()
        .map(|name| -> Result<BreakpointListing> {
            let steps = list_steps(&ctx.breakpoint_dir(&name))?;
            Ok(BreakpointListing {
                has_change_log: ctx.change_log_path(&name).is_file(),
                current: current_branch.as_deref() == Some(name.as_str()),
                last_activity: last_activity.get(&name).copied(),
                name,
                steps,
            })
        })
        .collect()
}

/// Execute the `breakpoint list` command.
pub fn cmd_list(ctx: &ProjectContext) -> Result<()> {
    let listings = collect(ctx, &GitCli)?;

    if listings.is_empty() {
        println!(
            "No breakpoints in {}. Create one with `breakpoint new <folder>`.",
            display_path(ctx, &ctx.breakpoints_dir)
        );
        return Ok(());
    }

    println!("Breakpoints");
    println!("===========");
    for listing in &listings {
        println!();
        let mut markers = Vec::new();
        if listing.current {
            markers.push("current branch");
        }
        if listing.has_change_log {
            markers.push("finished");
        }

        if markers.is_empty() {
            println!("{} ({} steps)", listing.name, listing.steps.len());
        } else {
            println!(
                "{} ({} steps) [{}]",
                listing.name,
                listing.steps.len(),
                markers.join(", ")
            );
        }

        if let Some(ts) = listing.last_activity {
            println!("  last activity: {}", ts.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        for step in &listing.steps {
            println!("  {}", step.folder);
        }
    }

    Ok(())
}
