//! Breakpoint and step naming rules.
//!
//! Breakpoint names become git branch names and directory names; step names
//! become part of a directory name and a commit message. Both are restricted
//! to a conservative character set so they are valid in all three places and
//! can never be mistaken for a git option.

use crate::error::{BreakpointError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Name of the first step of every breakpoint.
pub const INITIAL_STEP_NAME: &str = "initial";

/// Ordinal of the first step of every breakpoint.
pub const INITIAL_ORDINAL: u32 = 1;

/// Largest ordinal that fits the two-digit folder prefix.
pub const MAX_ORDINAL: u32 = 99;

/// Longest accepted breakpoint or step name.
pub const MAX_NAME_LEN: usize = 100;

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("Invalid name regex"));

static STEP_FOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})-(.*)$").expect("Invalid step folder regex"));

/// What a name is used for, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Breakpoint,
    Step,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameKind::Breakpoint => write!(f, "breakpoint name"),
            NameKind::Step => write!(f, "step name"),
        }
    }
}

/// Trim and validate a user-supplied name, returning the trimmed name.
pub fn validate_name(raw: &str, kind: NameKind) -> Result<String> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(BreakpointError::ValidationError(format!(
            "{} cannot be empty",
            kind
        )));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(BreakpointError::ValidationError(format!(
            "{} '{}' is longer than {} characters",
            kind, name, MAX_NAME_LEN
        )));
    }

    let valid = NAME_REGEX.is_match(name)
        && !name.contains("..")
        && !name.ends_with(".lock")
        && !name.ends_with('.');

    if !valid {
        let hint = match sanitize_slug(name) {
            slug if slug.is_empty() => String::new(),
            slug => format!(" Try '{}' instead.", slug),
        };
        return Err(BreakpointError::ValidationError(format!(
            "invalid {} '{}': use letters, digits, '.', '_' and '-', starting with a letter or digit.{}",
            kind, name, hint
        )));
    }

    Ok(name.to_string())
}

/// Turn arbitrary text into a valid name suggestion.
///
/// Converts to lowercase, replaces runs of other characters with a single
/// hyphen, and trims leading/trailing hyphens.
pub fn sanitize_slug(s: &str) -> String {
    let mut result = String::new();
    let mut last_was_hyphen = true;

    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    result
}

/// Folder name for a step: two-digit ordinal, dash, name.
pub fn step_folder_name(ordinal: u32, name: &str) -> String {
    format!("{:02}-{}", ordinal, name)
}

/// Folder name of the initial step (`01-initial`).
pub fn initial_step_folder() -> String {
    step_folder_name(INITIAL_ORDINAL, INITIAL_STEP_NAME)
}

/// Split a step folder name into its ordinal and name.
///
/// Returns `None` for names that do not start with two ASCII digits and a dash.
pub fn parse_step_folder(folder: &str) -> Option<(u32, &str)> {
    let captures = STEP_FOLDER_REGEX.captures(folder)?;
    let ordinal = captures.get(1)?.as_str().parse().ok()?;
    let name = captures.get(2)?.as_str();
    Some((ordinal, name))
}

/// Human-readable label for a step name (`fix-login-bug` -> `fix login bug`).
pub fn step_label(name: &str) -> String {
    name.replace('-', " ")
}
