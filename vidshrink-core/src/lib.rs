//! Core library for batch video compression using ffmpeg.
//!
//! This crate provides fixed encoder presets, video file discovery, ffmpeg
//! invocation, size reporting and a batch driver that records a per-file
//! outcome instead of stopping at the first failure.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidshrink_core::{CoreConfig, Preset, process_batch};
//! use vidshrink_core::external::{SidecarSpawner, StdFsMetadataProvider};
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(
//!     PathBuf::from("/path/to/input"),
//!     PathBuf::from("/path/to/output"),
//! );
//! config.preset = Preset::H265;
//! config.validate().unwrap();
//!
//! let report = process_batch(&SidecarSpawner, &StdFsMetadataProvider, &config).unwrap();
//! for job in report.failed() {
//!     eprintln!("{} failed", job.filename());
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod presets;
pub mod processing;
pub mod reporting;
pub mod terminal;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use discovery::{find_processable_files, is_processable_file, output_path_for};
pub use error::{CoreError, CoreResult, ErrorKind};
pub use presets::{Preset, resolve_preset};
pub use processing::{
    TranscodeJob, TranscodeOptions, compress_file, process_batch, process_files, run_transcode,
};
pub use reporting::{BatchReport, CompressionStats, JobFailure, JobReport, JobStatus, SizeReport};
pub use utils::{format_bytes, format_duration};
