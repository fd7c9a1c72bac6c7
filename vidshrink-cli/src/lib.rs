//! Library component for the vidshrink CLI application.
//!
//! This contains the argument definitions, logging setup and command logic
//! that the binary crate uses.

/// Command-line interface definitions using clap
pub mod cli;

/// Command implementations for each subcommand
pub mod commands;

/// Error handling utilities for the CLI
pub mod error;

/// Logging setup and helper functions
pub mod logging;

// Re-exports for convenience
pub use cli::{Cli, Commands, CompressArgs, parse_cli, parse_cli_from};
pub use commands::compress::run_compress;
pub use commands::presets::run_presets;
