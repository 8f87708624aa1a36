//! Process exit codes.

use crate::error::CliError;

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Bad input, bad configuration or a failed run.
pub const ERROR: i32 = 2;

/// Run cut short by its deadline or cancelled.
pub const INTERRUPTED: i32 = 130;

/// Exit code for the outcome of a command handler.
pub fn for_result(result: &Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(e) => e.exit_code(),
    }
}
