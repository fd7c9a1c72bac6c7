// ============================================================================
// vidshrink-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Spawning ffmpeg and Driving it to Completion
//
// The transcode invoker only talks to the two traits below, so tests can swap
// in the doubles from `mocks` and never touch a real binary.
//
// Contract for callers: `wait` must be called once `spawn` has succeeded,
// even when `handle_events` returned an error. `SidecarProcess` kills the
// child when its event stream cannot be read so that this wait returns.

use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};
use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::fmt;
use std::io;
use std::process::ExitStatus;

/// Program name used in ffmpeg-related errors.
const FFMPEG: &str = "ffmpeg";

/// A running ffmpeg process.
pub trait FfmpegProcess {
    /// Feeds every event ffmpeg emits to `handler`, stopping at the first
    /// handler error.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Blocks until ffmpeg exits.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Starts ffmpeg processes.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

/// Error for an ffmpeg whose output stream could not be read.
pub(crate) fn event_stream_error(reason: impl fmt::Display) -> CoreError {
    command_wait_error(
        FFMPEG,
        io::Error::other(format!("cannot read ffmpeg output: {reason}")),
    )
}

/// [`FfmpegProcess`] backed by an ffmpeg-sidecar child.
pub struct SidecarProcess {
    child: FfmpegChild,
}

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = match self.child.iter() {
            Ok(events) => events,
            Err(e) => {
                log::error!("No event stream from ffmpeg: {}", e);
                if let Err(kill_err) = self.child.kill() {
                    log::warn!("Failed to kill ffmpeg: {}", kill_err);
                }
                return Err(event_stream_error(e));
            }
        };
        events.into_iter().try_for_each(handler)
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.child.wait().map_err(|e| command_wait_error(FFMPEG, e))
    }
}

/// Production [`FfmpegSpawner`] using ffmpeg-sidecar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        log::debug!("Spawning {:?}", cmd.as_inner());
        let child = cmd.spawn().map_err(|e| command_start_error(FFMPEG, e))?;
        Ok(SidecarProcess { child })
    }
}
