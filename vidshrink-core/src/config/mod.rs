//! Configuration structures and constants for the vidshrink-core library.
//!
//! A [`CoreConfig`] carries everything a batch run needs: where to read
//! from, where to write to, which preset to use and how outputs are named.
//! It replaces any process-wide state; every entry point takes one.

mod builder;

use crate::error::{CoreError, CoreResult};
use crate::presets::Preset;

use std::path::PathBuf;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default file extension matched during discovery (case-insensitive).
pub const DEFAULT_EXTENSION: &str = "mp4";

/// Default prefix prepended to each input file name to form the output name.
pub const DEFAULT_OUTPUT_PREFIX: &str = "compressed_";

/// Default preset used when none is requested.
pub const DEFAULT_PRESET: Preset = Preset::H264;

/// Default ffmpeg executable, looked up on `PATH`.
pub const DEFAULT_FFMPEG_BINARY: &str = "ffmpeg";

/// Main configuration structure for the vidshrink-core library.
///
/// Only the two directories are required; everything else has a default.
///
/// # Examples
///
/// ```rust,no_run
/// use vidshrink_core::config::CoreConfigBuilder;
/// use vidshrink_core::Preset;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/videos/original"))
///     .output_dir(PathBuf::from("/videos/small"))
///     .preset(Preset::H265)
///     .extension("mov")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory containing input video files to process
    pub input_dir: PathBuf,

    /// Directory where compressed output files will be saved
    pub output_dir: PathBuf,

    /// Preset applied to every file in the run
    pub preset: Preset,

    /// Extension (without the dot) a file must have to be processed
    pub extension: String,

    /// Prefix prepended to the input file name for each output file
    pub output_prefix: String,

    /// Optional path to the ffmpeg binary (defaults to `ffmpeg` on `PATH`)
    pub ffmpeg_path: Option<PathBuf>,

    /// Overwrite existing output files instead of failing the job
    pub overwrite: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            preset: DEFAULT_PRESET,
            extension: DEFAULT_EXTENSION.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            ffmpeg_path: None,
            overwrite: false,
        }
    }
}

impl CoreConfig {
    /// Creates a configuration for the given directories with default settings.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ..Self::default()
        }
    }

    /// The ffmpeg program to invoke.
    pub fn ffmpeg_program(&self) -> PathBuf {
        self.ffmpeg_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FFMPEG_BINARY))
    }

    /// Checks that the input directory exists and the extension filter is usable.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.input_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "Input directory does not exist: {}",
                self.input_dir.display()
            )));
        }

        if self.extension.trim_start_matches('.').is_empty() {
            return Err(CoreError::Config(
                "File extension filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The extension filter without a leading dot.
    pub fn normalized_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}
