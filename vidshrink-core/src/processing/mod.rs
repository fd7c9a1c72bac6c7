//! Core compression logic and orchestration.
//!
//! [`transcode`] runs ffmpeg for a single input/output pair; [`batch`] walks a
//! directory, runs one transcode per matching file and collects the results.

/// Single-file ffmpeg invocation
pub mod transcode;

/// Directory-wide batch driver
pub mod batch;

pub use batch::{compress_file, prepare_output_dir, process_batch, process_files};
pub use transcode::{TranscodeJob, TranscodeOptions, ffmpeg_args, run_transcode};
