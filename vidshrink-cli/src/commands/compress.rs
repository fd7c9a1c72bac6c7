//! Implementation of the 'compress' subcommand.
//!
//! Resolves the preset, works out which files to process (a single file or
//! every matching file in a directory), hands them to vidshrink-core and
//! prints the per-file summary.

use crate::cli::CompressArgs;
use crate::error::{CliErrorContext, CliResult};

use vidshrink_core::external::{
    FfmpegSpawner, FileMetadataProvider, SidecarSpawner, StdFsMetadataProvider,
};
use vidshrink_core::{
    BatchReport, CoreConfig, CoreConfigBuilder, CoreError, JobStatus, Preset, format_bytes,
    format_duration, is_processable_file, process_batch, process_files, terminal,
};

use log::debug;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// What the input path turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressTarget {
    /// Compress every matching file in this directory
    Directory(PathBuf),
    /// Compress just this file; `parent` is used as the input directory
    File { file: PathBuf, parent: PathBuf },
}

impl CompressTarget {
    fn input_dir(&self) -> &PathBuf {
        match self {
            CompressTarget::Directory(dir) => dir,
            CompressTarget::File { parent, .. } => parent,
        }
    }
}

/// Classifies the input path as a directory or a single matching file.
///
/// # Errors
///
/// `CoreError::InvalidInput` if the path does not exist, is a file without
/// the configured extension, or is neither a file nor a directory.
pub fn discover_compress_target(args: &CompressArgs) -> CliResult<CompressTarget> {
    let input_path = args.input_path.canonicalize().map_err(|e| {
        CoreError::InvalidInput(format!(
            "cannot resolve '{}': {}",
            args.input_path.display(),
            e
        ))
    })?;

    let metadata = fs::metadata(&input_path)
        .cli_with_context(|| format!("Failed to access input path '{}'", input_path.display()))?;

    if metadata.is_dir() {
        return Ok(CompressTarget::Directory(input_path));
    }
    if !metadata.is_file() {
        return Err(CoreError::InvalidInput(format!(
            "'{}' is neither a file nor a directory",
            input_path.display()
        )));
    }

    let extension = args.extension.trim_start_matches('.');
    if !is_processable_file(&input_path, extension) {
        return Err(CoreError::InvalidInput(format!(
            "'{}' is not a .{} file (see --extension)",
            input_path.display(),
            extension
        )));
    }
    let parent = input_path
        .parent()
        .ok_or_else(|| {
            CoreError::InvalidInput(format!("'{}' has no parent directory", input_path.display()))
        })?
        .to_path_buf();
    Ok(CompressTarget::File {
        file: input_path,
        parent,
    })
}

/// Creates and validates CoreConfig from CLI arguments.
fn create_core_config(
    args: &CompressArgs,
    preset: Preset,
    target: &CompressTarget,
) -> CliResult<CoreConfig> {
    let mut builder = CoreConfigBuilder::new()
        .input_dir(target.input_dir().clone())
        .output_dir(args.output_dir.clone())
        .preset(preset)
        .extension(&args.extension)
        .output_prefix(&args.prefix)
        .overwrite(args.overwrite);

    if let Some(ffmpeg) = &args.ffmpeg {
        builder = builder.ffmpeg_path(ffmpeg.clone());
    }

    let config = builder.build()?;
    config.validate()?;
    Ok(config)
}

/// Displays the settings of the run.
fn display_initialization_info(args: &CompressArgs, config: &CoreConfig) {
    terminal::print_section("Initialization");
    terminal::print_status("Input", &args.input_path.display().to_string(), false);
    terminal::print_status("Output", &config.output_dir.display().to_string(), false);
    terminal::print_status("Preset", config.preset.name(), true);
    terminal::print_status("Encoder flags", &config.preset.encoder_args().join(" "), false);
    terminal::print_status("Extension", &format!(".{}", config.normalized_extension()), false);
    terminal::print_status("ffmpeg", &config.ffmpeg_program().display().to_string(), false);
}

/// Displays the per-file results and totals.
fn display_summary(report: &BatchReport, config: &CoreConfig, total_start_time: Instant) {
    terminal::print_section("Summary");

    if report.jobs.is_empty() {
        terminal::print_warning(&format!(
            "No .{} files found in {}",
            config.normalized_extension(),
            config.input_dir.display()
        ));
    }

    for job in &report.jobs {
        terminal::print_subsection(&job.filename());
        match &job.status {
            JobStatus::Succeeded(stats) => {
                terminal::print_status("Time", &format_duration(job.elapsed), false);
                terminal::print_status("Input", &format_bytes(stats.sizes.input_size), false);
                terminal::print_status("Output", &format_bytes(stats.sizes.output_size), true);
                terminal::print_status("Ratio", &format!("{:.2}%", stats.ratio_percent()), true);
                terminal::print_status(
                    "Reduction",
                    &format!("{:.1}%", stats.reduction_percent()),
                    false,
                );
            }
            JobStatus::Failed(failure) => {
                terminal::print_status("Status", &format!("failed ({})", failure.kind), true);
                terminal::print_status("Reason", &failure.message, false);
            }
        }
    }

    terminal::print_section("Totals");
    terminal::print_status("Succeeded", &report.success_count().to_string(), true);
    terminal::print_status(
        "Failed",
        &report.failure_count().to_string(),
        report.failure_count() > 0,
    );
    terminal::print_status(
        "Total time",
        &format_duration(total_start_time.elapsed()),
        false,
    );

    if report.all_succeeded() {
        terminal::print_success("All files compressed");
    } else {
        terminal::print_warning(&format!(
            "{} of {} file(s) failed",
            report.failure_count(),
            report.jobs.len()
        ));
    }
}

/// Runs the compress command with the real ffmpeg and returns the batch report.
///
/// Fatal problems (unknown preset, bad input path, unusable output
/// directory) are returned as errors; per-file failures are in the report.
pub fn run_compress(args: CompressArgs) -> CliResult<BatchReport> {
    compress_with(&SidecarSpawner, &StdFsMetadataProvider, args)
}

/// [`run_compress`] with the ffmpeg spawner and size lookups supplied by the caller.
pub fn compress_with<S: FfmpegSpawner, M: FileMetadataProvider>(
    spawner: &S,
    metadata: &M,
    args: CompressArgs,
) -> CliResult<BatchReport> {
    let total_start_time = Instant::now();

    let preset: Preset = args.preset.parse()?;
    let target = discover_compress_target(&args)?;
    let config = create_core_config(&args, preset, &target)?;

    debug!("Compress target: {:?}", target);
    debug!("Run started: {}", chrono::Local::now());

    display_initialization_info(&args, &config);

    let report = match &target {
        CompressTarget::Directory(_) => process_batch(spawner, metadata, &config)?,
        CompressTarget::File { file, .. } => {
            process_files(spawner, metadata, &config, std::slice::from_ref(file))?
        }
    };

    display_summary(&report, &config, total_start_time);

    if args.json {
        println!("{}", report.to_json()?);
    }

    debug!("Finished at: {}", chrono::Local::now());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Commands, parse_cli_from};
    use tempfile::tempdir;
    use vidshrink_core::external::mocks::{MockFfmpegSpawner, MockMetadataProvider};

    fn compress_args(input: &std::path::Path, output: &std::path::Path) -> CompressArgs {
        let cli = parse_cli_from([
            "vidshrink",
            "compress",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        match cli.command {
            Commands::Compress(args) => args,
            other => panic!("Expected Compress command, got {other:?}"),
        }
    }

    #[test]
    fn directory_input_is_a_directory_target() {
        let dir = tempdir().unwrap();
        let args = compress_args(dir.path(), &dir.path().join("out"));
        let target = discover_compress_target(&args).unwrap();
        assert_eq!(
            target,
            CompressTarget::Directory(dir.path().canonicalize().unwrap())
        );
    }

    #[test]
    fn matching_file_input_is_a_file_target() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("clip.MP4");
        fs::write(&file, b"data").unwrap();

        let args = compress_args(&file, &dir.path().join("out"));
        match discover_compress_target(&args).unwrap() {
            CompressTarget::File { file: found, parent } => {
                assert_eq!(found, file.canonicalize().unwrap());
                assert_eq!(parent, dir.path().canonicalize().unwrap());
            }
            other => panic!("Expected file target, got {other:?}"),
        }
    }

    #[test]
    fn non_matching_file_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, b"data").unwrap();

        let args = compress_args(&file, &dir.path().join("out"));
        let err = discover_compress_target(&args).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(err.to_string().contains("is not a .mp4 file"));
    }

    #[test]
    fn missing_input_is_rejected() {
        let dir = tempdir().unwrap();
        let args = compress_args(&dir.path().join("missing"), &dir.path().join("out"));
        let err = discover_compress_target(&args).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(err.to_string().starts_with("Invalid input: cannot resolve"));
    }

    #[test]
    fn unknown_preset_fails_before_touching_the_filesystem() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out");
        let mut args = compress_args(dir.path(), &output);
        args.preset = "ultra".to_string();

        let err = run_compress(args).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPreset { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn single_file_input_compresses_only_that_file() {
        let dir = tempdir().unwrap();
        let wanted = dir.path().join("wanted.mp4");
        fs::write(&wanted, vec![0u8; 100]).unwrap();
        fs::write(dir.path().join("other.mp4"), vec![0u8; 100]).unwrap();
        let output = dir.path().join("out");

        let spawner = MockFfmpegSpawner::succeeding(&[0u8; 40]);
        let metadata = MockMetadataProvider::new();
        let args = compress_args(&wanted, &output);
        let report = compress_with(&spawner, &metadata, args).unwrap();

        assert_eq!(report.jobs.len(), 1);
        assert!(report.all_succeeded());
        assert_eq!(spawner.get_received_calls().len(), 1);
        assert!(output.join("compressed_wanted.mp4").is_file());
        assert!(!output.join("compressed_other.mp4").exists());

        let JobStatus::Succeeded(stats) = &report.jobs[0].status else {
            panic!("Expected success, got {:?}", report.jobs[0].status);
        };
        assert!((stats.reduction_percent() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn directory_input_keeps_going_after_a_failed_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp4"), b"aaaa").unwrap();
        fs::write(dir.path().join("b.mp4"), b"bbbb").unwrap();
        let output = dir.path().join("out");

        let spawner = MockFfmpegSpawner::succeeding(b"x");
        spawner.add_exit_error_expectation("a.mp4", Vec::new(), 1);
        let metadata = MockMetadataProvider::new();
        let args = compress_args(dir.path(), &output);
        let report = compress_with(&spawner, &metadata, args).unwrap();

        assert_eq!(report.jobs.len(), 2);
        assert_eq!(report.failure_count(), 1);
        assert!(!report.all_succeeded());
        assert!(output.join("compressed_b.mp4").is_file());
    }
}
