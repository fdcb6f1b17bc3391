//! Error types for the breakpoint CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for breakpoint operations.
///
/// Each variant maps to a specific exit code (see [`exit_codes`]).
#[derive(Error, Debug)]
pub enum BreakpointError {
    /// User provided invalid arguments or the project is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// The user declined a confirmation or cancelled a prompt.
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// The project root could not be resolved.
    #[error("No workspace: {0}")]
    NoWorkspace(String),

    /// There is no breakpoint to select.
    #[error("no breakpoints found in '{}'. Create one with `breakpoint new <folder>`.", .0.display())]
    NoBreakpoints(PathBuf),

    /// The step folder computed for a new step already exists.
    #[error("step '{0}' already exists")]
    DuplicateStep(String),

    /// A name or selection failed validation.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// A git command exited non-zero or could not be spawned.
    #[error("git {command} failed: {message}")]
    GitError { command: String, message: String },

    /// The operation needs the project to be a git repository.
    #[error("{0}")]
    GitRequired(String),

    /// Filesystem failure while copying, listing or writing.
    #[error("{0}")]
    IoError(String),
}

impl BreakpointError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BreakpointError::UserError(_)
            | BreakpointError::Cancelled(_)
            | BreakpointError::NoWorkspace(_)
            | BreakpointError::NoBreakpoints(_)
            | BreakpointError::DuplicateStep(_) => exit_codes::USER_ERROR,
            BreakpointError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            BreakpointError::GitError { .. } | BreakpointError::GitRequired(_) => {
                exit_codes::GIT_FAILURE
            }
            BreakpointError::IoError(_) => exit_codes::IO_FAILURE,
        }
    }

    /// Build a git error from the argument list that was run.
    pub fn git(args: &[&str], message: impl Into<String>) -> Self {
        BreakpointError::GitError {
            command: args.join(" "),
            message: message.into(),
        }
    }
}

/// Result type alias for breakpoint operations.
pub type Result<T> = std::result::Result<T, BreakpointError>;
