// ============================================================================
// vidshrink-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and File Output
//
// All user-facing output, including the terminal UI from vidshrink-core,
// goes through the `log` facade. This module installs a `fern` dispatcher
// that prints plain messages to the console and, when a log directory is
// given, mirrors every record into a timestamped run log without ANSI codes.
//
// Levels: Info by default, Debug with --verbose. ffmpeg-sidecar's own
// chatter is capped at Warn.

use crate::error::{CliErrorContext, CliResult};

use log::{Level, LevelFilter};
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// use vidshrink_cli::logging::get_timestamp;
///
/// let log_filename = format!("vidshrink_run_{}.log", get_timestamp());
/// assert!(log_filename.len() > "vidshrink_run_.log".len());
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Name of the run log for a given timestamp.
pub fn run_log_filename(timestamp: &str) -> String {
    format!("vidshrink_run_{timestamp}.log")
}

/// Installs the global logger.
///
/// `console_to_stderr` keeps stdout free for machine-readable output.
/// Returns the path of the run log when `log_dir` is set.
pub fn init_logging(
    level: LevelFilter,
    log_dir: Option<&Path>,
    console_to_stderr: bool,
) -> CliResult<Option<PathBuf>> {
    let console_output: fern::Output = if console_to_stderr {
        std::io::stderr().into()
    } else {
        std::io::stdout().into()
    };

    let console = fern::Dispatch::new()
        .format(|out, message, record| match record.level() {
            Level::Error => out.finish(format_args!("ERROR: {message}")),
            Level::Warn => out.finish(format_args!("WARN: {message}")),
            _ => out.finish(format_args!("{message}")),
        })
        .chain(console_output);

    let mut dispatch = fern::Dispatch::new()
        .level(level)
        .level_for("ffmpeg_sidecar", LevelFilter::Warn)
        .chain(console);

    let log_path = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .cli_with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let path = dir.join(run_log_filename(&get_timestamp()));
            let file = fern::log_file(&path)
                .cli_with_context(|| format!("Failed to create log file {}", path.display()))?;

            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        let plain = strip_ansi_escapes::strip_str(message.to_string());
                        out.finish(format_args!(
                            "{} [{}] {}",
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                            record.level(),
                            plain
                        ))
                    })
                    .chain(file),
            );
            Some(path)
        }
        None => None,
    };

    dispatch.apply().map_err(|e| {
        vidshrink_core::CoreError::OperationFailed(format!("Failed to initialize logging: {e}"))
    })?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_expected_shape() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(&ts[8..9], "_");
        assert!(ts.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn run_log_name() {
        assert_eq!(
            run_log_filename("20240601_123045"),
            "vidshrink_run_20240601_123045.log"
        );
    }
}
