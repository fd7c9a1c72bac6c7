// ============================================================================
// vidshrink-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig instances. The two directories are
// required; build() reports a configuration error if either is missing.

use std::path::PathBuf;

use super::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::presets::Preset;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use vidshrink_core::config::CoreConfigBuilder;
/// use vidshrink_core::Preset;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/input"))
///     .output_dir(PathBuf::from("/path/to/output"))
///     .preset(Preset::Bitrate)
///     .output_prefix("small_")
///     .overwrite(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.preset, Preset::Bitrate);
/// assert_eq!(config.output_prefix, "small_");
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfigBuilder {
    // Required fields
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,

    // Optional fields with defaults
    preset: Preset,
    extension: String,
    output_prefix: String,
    ffmpeg_path: Option<PathBuf>,
    overwrite: bool,
}

impl Default for CoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            preset: super::DEFAULT_PRESET,
            extension: super::DEFAULT_EXTENSION.to_string(),
            output_prefix: super::DEFAULT_OUTPUT_PREFIX.to_string(),
            ffmpeg_path: None,
            overwrite: false,
        }
    }

    /// Sets the input directory.
    pub fn input_dir(mut self, input_dir: PathBuf) -> Self {
        self.input_dir = Some(input_dir);
        self
    }

    /// Sets the output directory.
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    /// Sets the preset applied to every file.
    pub fn preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    /// Sets the extension filter (with or without a leading dot).
    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    /// Sets the prefix used to name output files.
    pub fn output_prefix(mut self, prefix: &str) -> Self {
        self.output_prefix = prefix.to_string();
        self
    }

    /// Sets an explicit ffmpeg binary.
    pub fn ffmpeg_path(mut self, path: PathBuf) -> Self {
        self.ffmpeg_path = Some(path);
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Builds a CoreConfig instance from the builder.
    ///
    /// # Errors
    ///
    /// * `CoreError::Config` if the input or output directory was not set
    pub fn build(self) -> CoreResult<CoreConfig> {
        let input_dir = self
            .input_dir
            .ok_or_else(|| CoreError::Config("input_dir is required".to_string()))?;
        let output_dir = self
            .output_dir
            .ok_or_else(|| CoreError::Config("output_dir is required".to_string()))?;

        Ok(CoreConfig {
            input_dir,
            output_dir,
            preset: self.preset,
            extension: self.extension,
            output_prefix: self.output_prefix,
            ffmpeg_path: self.ffmpeg_path,
            overwrite: self.overwrite,
        })
    }
}
