//! Size reporting and batch summaries.
//!
//! This module measures input and output file sizes after a transcode and
//! derives the compression ratio shown to the user. The [`summary`] submodule
//! holds the per-job and per-batch records built from those measurements.

pub mod summary;

use crate::error::{CoreError, CoreResult};
use crate::external::FileMetadataProvider;

use serde::Serialize;
use std::path::{Path, PathBuf};

pub use summary::{BatchReport, JobFailure, JobReport, JobStatus};

/// Input and output sizes of one transcode, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeReport {
    pub input_size: u64,
    pub output_size: u64,
}

impl SizeReport {
    pub fn new(input_size: u64, output_size: u64) -> Self {
        Self {
            input_size,
            output_size,
        }
    }

    /// Output size as a fraction of the input size (0.5 means half as big).
    ///
    /// # Errors
    ///
    /// * `CoreError::ZeroSizeInput` if the input is empty; `input` is only
    ///   used for the error message
    pub fn compression_ratio(&self, input: &Path) -> CoreResult<f64> {
        if self.input_size == 0 {
            return Err(CoreError::ZeroSizeInput(input.to_path_buf()));
        }
        Ok(self.output_size as f64 / self.input_size as f64)
    }
}

/// Sizes of a completed job together with its compression ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionStats {
    #[serde(flatten)]
    pub sizes: SizeReport,
    /// Output size / input size
    pub ratio: f64,
}

impl CompressionStats {
    /// The ratio as a percentage, e.g. 50.0 for a file halved in size.
    pub fn ratio_percent(&self) -> f64 {
        self.ratio * 100.0
    }

    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.ratio) * 100.0
    }
}

/// Reads both file sizes through `metadata` and computes the ratio.
///
/// # Errors
///
/// * `CoreError::InputNotFound` / `CoreError::OutputMissing` if a size cannot be read
/// * `CoreError::ZeroSizeInput` if the input is empty
pub fn measure_compression<M: FileMetadataProvider>(
    metadata: &M,
    input: &Path,
    output: &Path,
) -> CoreResult<CompressionStats> {
    let input_size = metadata
        .get_size(input)
        .map_err(|_| CoreError::InputNotFound(input.to_path_buf()))?;
    let output_size = metadata
        .get_size(output)
        .map_err(|_| CoreError::OutputMissing(PathBuf::from(output)))?;

    let sizes = SizeReport::new(input_size, output_size);
    let ratio = sizes.compression_ratio(input)?;
    Ok(CompressionStats { sizes, ratio })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockMetadataProvider;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn half_size_output_reports_fifty_percent() {
        let sizes = SizeReport::new(10 * MIB, 5 * MIB);
        let ratio = sizes.compression_ratio(Path::new("in.mp4")).unwrap();
        assert!((ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_byte_input_is_an_error_not_nan() {
        let sizes = SizeReport::new(0, 5 * MIB);
        match sizes.compression_ratio(Path::new("empty.mp4")) {
            Err(CoreError::ZeroSizeInput(path)) => assert_eq!(path, PathBuf::from("empty.mp4")),
            other => panic!("expected ZeroSizeInput, got {other:?}"),
        }
    }

    #[test]
    fn larger_output_gives_negative_reduction() {
        let stats = CompressionStats {
            sizes: SizeReport::new(100, 150),
            ratio: 1.5,
        };
        assert!((stats.reduction_percent() + 50.0).abs() < 1e-9);
    }

    #[test]
    fn measure_compression_uses_metadata_provider() {
        let metadata = MockMetadataProvider::new();
        let input = Path::new("/virtual/in.mp4");
        let output = Path::new("/virtual/compressed_in.mp4");
        metadata.set_size(input, 10 * MIB);
        metadata.set_size(output, 5 * MIB);

        let stats = measure_compression(&metadata, input, output).unwrap();
        assert_eq!(stats.sizes, SizeReport::new(10 * MIB, 5 * MIB));
        assert!((stats.ratio_percent() - 50.0).abs() < 1e-9);
        assert!((stats.reduction_percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn measure_compression_reports_missing_output() {
        let metadata = MockMetadataProvider::new();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        std::fs::write(&input, b"data").unwrap();

        let result = measure_compression(&metadata, &input, &dir.path().join("missing.mp4"));
        assert!(matches!(result, Err(CoreError::OutputMissing(_))));
    }
}
