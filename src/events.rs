//! Event logging for breakpoint.
//!
//! Every successful command appends one event to
//! `<breakpoints_dir>/events.ndjson` (one JSON object per line). The log is
//! written before the command's final commit so the event and the snapshot it
//! describes land in the same commit.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The action performed (new_breakpoint, add_step, ...)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `breakpoint`: Optional breakpoint name
//! - `details`: Freeform object with action-specific details
//!
//! ```no_run
//! let event = Event::new(EventAction::AddStep)
//!     .with_breakpoint("lesson-1")
//!     .with_details(json!({"step": "02-edit", "files": 2}));
//! append_event(&ctx, &event)?;
//! ```

use crate::context::ProjectContext;
use crate::error::{BreakpointError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Breakpoint created (initial snapshot taken)
    NewBreakpoint,
    /// Step added to a breakpoint
    AddStep,
    /// Main branch pushed to the remote
    PushMain,
    /// Change log generated
    FinishBreakpoint,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::NewBreakpoint => write!(f, "new_breakpoint"),
            EventAction::AddStep => write!(f, "add_step"),
            EventAction::PushMain => write!(f, "push_main"),
            EventAction::FinishBreakpoint => write!(f, "finish_breakpoint"),
        }
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Breakpoint the action applied to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action, stamped now.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            breakpoint: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the breakpoint name for this event.
    pub fn with_breakpoint(mut self, name: impl Into<String>) -> Self {
        self.breakpoint = Some(name.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            BreakpointError::IoError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the project's event log.
///
/// Creates the breakpoints directory and the log file as needed. Does nothing
/// when `event_log` is disabled in the config.
pub fn append_event(ctx: &ProjectContext, event: &Event) -> Result<()> {
    if !ctx.config.event_log {
        return Ok(());
    }

    let events_file = ctx.events_file();
    let json_line = event.to_ndjson_line()?;

    if !ctx.breakpoints_dir.exists() {
        fs::create_dir_all(&ctx.breakpoints_dir).map_err(|e| {
            BreakpointError::IoError(format!(
                "failed to create directory '{}': {}",
                ctx.breakpoints_dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            BreakpointError::IoError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        BreakpointError::IoError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        BreakpointError::IoError(format!(
            "failed to sync events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    Ok(())
}

/// Read every event in the log, oldest first. A missing log is empty.
pub fn read_events(ctx: &ProjectContext) -> Result<Vec<Event>> {
    let events_file = ctx.events_file();
    if !events_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&events_file).map_err(|e| {
        BreakpointError::IoError(format!(
            "failed to read events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| {
                BreakpointError::IoError(format!(
                    "malformed event on line {} of '{}': {}",
                    index + 1,
                    events_file.display(),
                    e
                ))
            })
        })
        .collect()
}
