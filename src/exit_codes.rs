//! Exit code constants for the breakpoint CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state, cancelled prompt)
//! - 2: Validation failure (invalid breakpoint/step names)
//! - 3: Git operation failure
//! - 4: Filesystem failure while snapshotting or writing

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing breakpoint, or a declined confirmation.
pub const USER_ERROR: i32 = 1;

/// Validation failure: empty or disallowed name, exhausted step ordinals.
pub const VALIDATION_FAILURE: i32 = 2;

/// Git operation failure: checkout, commit, merge or push errors.
pub const GIT_FAILURE: i32 = 3;

/// Filesystem failure: unreadable source or unwritable destination.
pub const IO_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, VALIDATION_FAILURE, GIT_FAILURE, IO_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
