// ============================================================================
// vidshrink-core/src/processing/transcode.rs
// ============================================================================
//
// TRANSCODE INVOKER: One ffmpeg Run for One Input/Output Pair
//
// Builds the ffmpeg argument vector for a job, spawns ffmpeg through an
// FfmpegSpawner, drains its events and checks the result.
//
// A job succeeds when ffmpeg exits with status zero and the output file
// exists. Everything else is returned as an error; nothing is retried.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::{FfmpegProcess, FfmpegSpawner};
use crate::presets::Preset;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use log::{debug, warn};

use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs::File;
use std::path::PathBuf;

/// Number of ffmpeg error lines kept for the failure message.
const ERROR_TAIL_LINES: usize = 5;

/// One input-to-output transcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub preset: Preset,
}

impl TranscodeJob {
    pub fn new(input: PathBuf, output: PathBuf, preset: Preset) -> Self {
        Self {
            input,
            output,
            preset,
        }
    }
}

/// How ffmpeg is invoked, independent of the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// ffmpeg binary (name on `PATH` or explicit path)
    pub ffmpeg_program: PathBuf,
    /// Pass `-y` instead of `-n`
    pub overwrite: bool,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            ffmpeg_program: PathBuf::from(crate::config::DEFAULT_FFMPEG_BINARY),
            overwrite: false,
        }
    }
}

impl From<&CoreConfig> for TranscodeOptions {
    fn from(config: &CoreConfig) -> Self {
        Self {
            ffmpeg_program: config.ffmpeg_program(),
            overwrite: config.overwrite,
        }
    }
}

/// Full ffmpeg argument vector for `job`:
/// `-hide_banner (-y|-n) -i <input> <preset flags> <output>`.
///
/// Paths are passed through as raw OS strings.
pub fn ffmpeg_args(job: &TranscodeJob, overwrite: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-hide_banner".into(),
        if overwrite { "-y" } else { "-n" }.into(),
        "-i".into(),
        job.input.clone().into_os_string(),
    ];
    args.extend(job.preset.encoder_args().into_iter().map(OsString::from));
    args.push(job.output.clone().into_os_string());
    args
}

/// Runs ffmpeg for one job.
///
/// The input must exist, be readable and be non-empty. The output's parent
/// directory must already exist; preparing it is the batch driver's job.
///
/// # Errors
///
/// * `CoreError::InputNotFound` if the input cannot be opened
/// * `CoreError::ZeroSizeInput` if the input is empty
/// * `CoreError::PathError` if the output directory does not exist
/// * `CoreError::ToolNotFound` / `CoreError::CommandStart` if ffmpeg cannot be started
/// * `CoreError::CommandWait` if ffmpeg's output or exit status cannot be read
/// * `CoreError::CommandFailed` if ffmpeg exits with a non-zero status
/// * `CoreError::OutputMissing` if ffmpeg succeeded but left no output file
pub fn run_transcode<S: FfmpegSpawner>(
    spawner: &S,
    job: &TranscodeJob,
    options: &TranscodeOptions,
) -> CoreResult<()> {
    let input = File::open(&job.input).map_err(|e| {
        debug!("Cannot open input {}: {}", job.input.display(), e);
        CoreError::InputNotFound(job.input.clone())
    })?;
    if input.metadata()?.len() == 0 {
        return Err(CoreError::ZeroSizeInput(job.input.clone()));
    }

    if let Some(parent) = job.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(CoreError::PathError(format!(
                "Output directory does not exist: {}",
                parent.display()
            )));
        }
    }

    let args = ffmpeg_args(job, options.overwrite);
    debug!("Running: {} {:?}", options.ffmpeg_program.display(), args);

    let mut cmd = FfmpegCommand::new_with_path(&options.ffmpeg_program);
    cmd.args(&args);

    let mut process = spawner.spawn(cmd)?;

    let mut error_tail: VecDeque<String> = VecDeque::with_capacity(ERROR_TAIL_LINES);
    let events = process.handle_events(|event| {
        let message = match event {
            FfmpegEvent::Error(message) => message,
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, message) => message,
            _ => return Ok(()),
        };
        debug!("ffmpeg: {}", message);
        if error_tail.len() == ERROR_TAIL_LINES {
            error_tail.pop_front();
        }
        error_tail.push_back(message);
        Ok(())
    });

    // Reap the child before reporting a broken event stream.
    let status = process.wait();
    events?;
    let status = status?;
    if !status.success() {
        let details = if error_tail.is_empty() {
            "no error output".to_string()
        } else {
            error_tail.into_iter().collect::<Vec<_>>().join("; ")
        };
        warn!("ffmpeg failed for {}: {}", job.input.display(), details);
        return Err(command_failed_error("ffmpeg", status, details));
    }

    if !job.output.is_file() {
        return Err(CoreError::OutputMissing(job.output.clone()));
    }

    Ok(())
}
