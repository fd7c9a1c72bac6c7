// ============================================================================
// vidshrink-core/src/processing/batch.rs
// ============================================================================
//
// BATCH DRIVER: Directory-wide Compression
//
// WORKFLOW:
// 1. Validate the configuration (input directory exists)
// 2. Discover matching files in the input directory
// 3. Create the output directory if it is missing
// 4. For each file, derive the output path, run ffmpeg and measure sizes
// 5. Record every outcome in a BatchReport
//
// Per-file errors are caught here and recorded; they never stop the batch.
// Only configuration problems and an unusable output directory are fatal.

use crate::config::CoreConfig;
use crate::discovery::{find_processable_files, output_path_for};
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegSpawner, FileMetadataProvider};
use crate::presets::Preset;
use crate::processing::transcode::{TranscodeJob, TranscodeOptions, run_transcode};
use crate::reporting::{BatchReport, JobFailure, JobReport, JobStatus, measure_compression};
use crate::terminal;
use crate::utils::{format_bytes, format_duration};

use log::{debug, info, warn};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Creates `output_dir` if it does not exist yet.
///
/// Returns `true` when the directory was created by this call.
///
/// # Errors
///
/// * `CoreError::PathError` if the path exists but is not a directory, or
///   cannot be created
pub fn prepare_output_dir(output_dir: &Path) -> CoreResult<bool> {
    if output_dir.is_dir() {
        return Ok(false);
    }
    if output_dir.exists() {
        return Err(CoreError::PathError(format!(
            "Output path '{}' exists and is not a directory",
            output_dir.display()
        )));
    }

    fs::create_dir_all(output_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to create output directory '{}': {}",
            output_dir.display(),
            e
        ))
    })?;
    info!("Created output directory {}", output_dir.display());
    Ok(true)
}

/// Transcodes one file and measures the result. Never fails: errors are
/// recorded in the returned report.
pub fn compress_file<S: FfmpegSpawner, M: FileMetadataProvider>(
    spawner: &S,
    metadata: &M,
    job: TranscodeJob,
    options: &TranscodeOptions,
) -> JobReport {
    let start = Instant::now();
    let outcome = run_transcode(spawner, &job, options)
        .and_then(|()| measure_compression(metadata, &job.input, &job.output));

    let status = match outcome {
        Ok(stats) => JobStatus::Succeeded(stats),
        Err(e) => JobStatus::Failed(JobFailure::from(&e)),
    };

    JobReport {
        input: job.input,
        output: job.output,
        preset: job.preset,
        elapsed: start.elapsed(),
        status,
    }
}

/// Compresses an explicit list of files into `config.output_dir`.
///
/// The output directory is created, if missing, before the first ffmpeg run.
pub fn process_files<S: FfmpegSpawner, M: FileMetadataProvider>(
    spawner: &S,
    metadata: &M,
    config: &CoreConfig,
    files_to_process: &[PathBuf],
) -> CoreResult<BatchReport> {
    let mut report = BatchReport::new();
    prepare_output_dir(&config.output_dir)?;
    if files_to_process.is_empty() {
        return Ok(report);
    }

    let options = TranscodeOptions::from(config);

    terminal::print_section("Compressing");
    terminal::print_status("Preset", config.preset.name(), true);
    terminal::print_status("Output", &config.output_dir.display().to_string(), false);

    for (index, input) in files_to_process.iter().enumerate() {
        let job = match output_path_for(input, &config.output_dir, &config.output_prefix) {
            Ok(output) => TranscodeJob::new(input.clone(), output, config.preset),
            Err(e) => {
                warn!("Skipping {}: {}", input.display(), e);
                report.push(failed_job(input, config.preset, &e));
                continue;
            }
        };

        terminal::print_processing(&format!(
            "[{}/{}] {}",
            index + 1,
            files_to_process.len(),
            input.display()
        ));

        let job_report = compress_file(spawner, metadata, job, &options);
        display_job(&job_report);
        report.push(job_report);
    }

    debug!(
        "Batch finished: {} succeeded, {} failed",
        report.success_count(),
        report.failure_count()
    );
    Ok(report)
}

/// Discovers matching files in `config.input_dir` and compresses each one.
///
/// An input directory without matching files yields an empty report.
///
/// # Examples
///
/// ```rust,no_run
/// use vidshrink_core::{CoreConfig, process_batch};
/// use vidshrink_core::external::{SidecarSpawner, StdFsMetadataProvider};
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(PathBuf::from("videos_ori"), PathBuf::from("videos"));
/// let report = process_batch(&SidecarSpawner, &StdFsMetadataProvider, &config).unwrap();
/// println!("{} ok, {} failed", report.success_count(), report.failure_count());
/// ```
pub fn process_batch<S: FfmpegSpawner, M: FileMetadataProvider>(
    spawner: &S,
    metadata: &M,
    config: &CoreConfig,
) -> CoreResult<BatchReport> {
    config.validate()?;

    let files = match find_processable_files(&config.input_dir, config.normalized_extension()) {
        Ok(files) => files,
        Err(CoreError::NoFilesFound) => {
            warn!(
                "No .{} files found in {}",
                config.normalized_extension(),
                config.input_dir.display()
            );
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    info!("Found {} file(s) to compress", files.len());

    process_files(spawner, metadata, config, &files)
}

fn failed_job(input: &Path, preset: Preset, err: &CoreError) -> JobReport {
    JobReport {
        input: input.to_path_buf(),
        output: PathBuf::new(),
        preset,
        elapsed: std::time::Duration::ZERO,
        status: JobStatus::Failed(JobFailure::from(err)),
    }
}

fn display_job(job: &JobReport) {
    match &job.status {
        JobStatus::Succeeded(stats) => {
            terminal::print_status("Input size", &format_bytes(stats.sizes.input_size), false);
            terminal::print_status("Output size", &format_bytes(stats.sizes.output_size), false);
            terminal::print_status("Ratio", &format!("{:.2}%", stats.ratio_percent()), true);
            terminal::print_status("Time", &format_duration(job.elapsed), false);
            terminal::print_success(&format!("Compressed to {}", job.output.display()));
        }
        JobStatus::Failed(failure) => {
            terminal::print_warning(&format!("Failed ({}): {}", failure.kind, failure.message));
        }
    }
}
