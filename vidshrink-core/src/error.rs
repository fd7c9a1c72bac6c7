// ============================================================================
// vidshrink-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the vidshrink Core Library
//
// This module defines the error type shared by every operation in the core
// library, plus a coarse classification used when per-file failures are
// recorded in a batch report.
//
// KEY COMPONENTS:
// - CoreError: All failure modes (presets, ffmpeg, filesystem, config)
// - ErrorKind: Serializable category of a CoreError
// - Helper constructors for command start/wait/exit failures

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the vidshrink core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown preset '{name}' (available: {available})")]
    InvalidPreset { name: String, available: String },

    #[error("External tool '{0}' was not found")]
    ToolNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed while waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Input file not found or unreadable: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input file is empty: {}", .0.display())]
    ZeroSizeInput(PathBuf),

    #[error("Transcode reported success but produced no output: {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No processable files found")]
    NoFilesFound,

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for vidshrink core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Broad category of a [`CoreError`], recorded per job in batch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An unknown preset name was requested.
    InvalidPreset,
    /// ffmpeg is missing, could not start, or exited unsuccessfully.
    ExternalTool,
    /// Missing input, permission problems, empty input, missing output.
    Filesystem,
    /// Invalid run configuration or report serialization.
    Config,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidPreset { .. } => ErrorKind::InvalidPreset,
            CoreError::ToolNotFound(_)
            | CoreError::CommandStart(..)
            | CoreError::CommandWait(..)
            | CoreError::CommandFailed(..) => ErrorKind::ExternalTool,
            CoreError::InputNotFound(_)
            | CoreError::ZeroSizeInput(_)
            | CoreError::OutputMissing(_)
            | CoreError::PathError(_)
            | CoreError::Io(_) => ErrorKind::Filesystem,
            CoreError::Config(_)
            | CoreError::InvalidInput(_)
            | CoreError::NoFilesFound
            | CoreError::Json(_)
            | CoreError::OperationFailed(_) => ErrorKind::Config,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorKind::InvalidPreset => "invalid preset",
            ErrorKind::ExternalTool => "external tool",
            ErrorKind::Filesystem => "filesystem",
            ErrorKind::Config => "configuration",
        };
        f.write_str(label)
    }
}

/// Maps a spawn failure to `ToolNotFound` when the binary is missing,
/// otherwise to `CommandStart`.
pub fn command_start_error(cmd_name: impl Into<String>, err: io::Error) -> CoreError {
    let cmd_name = cmd_name.into();
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::ToolNotFound(cmd_name)
    } else {
        CoreError::CommandStart(cmd_name, err)
    }
}

pub fn command_wait_error(cmd_name: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd_name.into(), err)
}

pub fn command_failed_error(
    cmd_name: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd_name.into(), status, stderr.into())
}
