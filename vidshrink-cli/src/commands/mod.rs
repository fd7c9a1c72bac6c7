//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `compress` command.
/// Runs the configured preset over a single file or a whole directory.
pub mod compress;

/// Module containing the implementation of the `presets` command.
pub mod presets;
