// ============================================================================
// vidshrink-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and the File System
//
// This module encapsulates interactions with the ffmpeg command-line tool and
// file metadata lookups. Both sit behind traits so the batch driver can be
// exercised without a real ffmpeg binary or real multi-megabyte files.
//
// KEY COMPONENTS:
// - FfmpegSpawner / FfmpegProcess: spawning and waiting on ffmpeg
// - FileMetadataProvider: file size lookups
// - mocks: test doubles for both

// ---- Internal crate imports ----
use crate::error::CoreResult;

// ---- Standard library imports ----
use std::path::Path;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Test doubles for ffmpeg execution and file metadata.
/// Built for unit tests, or for other crates with the `test-mocks` feature.
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};

// ============================================================================
// FILE METADATA ACCESS
// ============================================================================

/// Trait for abstracting file metadata access operations.
///
/// # Examples
///
/// ```rust
/// use vidshrink_core::external::FileMetadataProvider;
/// use vidshrink_core::CoreResult;
/// use std::path::Path;
///
/// struct FixedSize;
///
/// impl FileMetadataProvider for FixedSize {
///     fn get_size(&self, _path: &Path) -> CoreResult<u64> {
///         Ok(1_000_000)
///     }
/// }
///
/// assert_eq!(FixedSize.get_size(Path::new("/fake/path")).unwrap(), 1_000_000);
/// ```
pub trait FileMetadataProvider {
    /// Gets the size of the file at the given path in bytes.
    fn get_size(&self, path: &Path) -> CoreResult<u64>;
}

/// Standard implementation of FileMetadataProvider using `std::fs::metadata`.
#[derive(Debug, Clone, Default)]
pub struct StdFsMetadataProvider;

impl FileMetadataProvider for StdFsMetadataProvider {
    fn get_size(&self, path: &Path) -> CoreResult<u64> {
        Ok(std::fs::metadata(path)?.len())
    }
}
