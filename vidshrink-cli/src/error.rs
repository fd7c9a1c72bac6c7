// ============================================================================
// vidshrink-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING
//
// The CLI reports everything as a `CoreError`. Problems with what the user
// passed in are `CoreError::InvalidInput`; filesystem failures while setting
// up the run (resolving paths, creating the log directory) become
// `CoreError::PathError` via `cli_with_context`.

use vidshrink_core::{CoreError, CoreResult};

use std::fmt;
use std::io;

/// Result type of the CLI commands.
pub type CliResult<T> = CoreResult<T>;

/// Adds a description of what was being attempted to an I/O failure.
pub trait CliErrorContext<T> {
    /// Maps the error to `CoreError::PathError("<context>: <io error>")`.
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T> CliErrorContext<T> for io::Result<T> {
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| CoreError::PathError(format!("{}: {}", f(), e)))
    }
}
