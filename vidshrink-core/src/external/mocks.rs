// vidshrink-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---
//
// Test doubles for the ffmpeg spawner and the file metadata provider. They
// record every ffmpeg argument list they receive and can be told to succeed,
// exit with a failure code, or fail to spawn, per matching argument pattern.

use super::{FfmpegProcess, FfmpegSpawner, FileMetadataProvider};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Builds an `ExitStatus` carrying the given exit code.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

/// Builds an `ExitStatus` carrying the given exit code.
#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Mock implementation of FfmpegProcess.
///
/// Clones share state, so a test can keep a clone to check `was_waited`
/// after handing the process to a spawner expectation.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
    /// Returned by handle_events after the events were emitted.
    stream_error: Rc<RefCell<Option<CoreError>>>,
    waited: Rc<Cell<bool>>,
}

impl MockFfmpegProcess {
    pub fn new(events: Vec<FfmpegEvent>, exit_code: i32) -> Self {
        Self {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: exit_status(exit_code),
            stream_error: Rc::new(RefCell::new(None)),
            waited: Rc::new(Cell::new(false)),
        }
    }

    /// A process whose event stream breaks with `error` before exiting with `exit_code`.
    pub fn with_stream_error(error: CoreError, exit_code: i32) -> Self {
        let process = Self::new(Vec::new(), exit_code);
        *process.stream_error.borrow_mut() = Some(error);
        process
    }

    pub fn was_waited(&self) -> bool {
        self.waited.get()
    }
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = self.events_to_emit.borrow().clone();
        for event in events {
            handler(event)?;
        }
        match self.stream_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.waited.set(true);
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    /// Bytes to write to the output path (the last argument) before returning.
    pub dummy_output: Option<Vec<u8>>,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Calls are matched against expectations by substring on any argument; the
/// first match is consumed. Unmatched calls use the fallback behaviour set
/// with [`MockFfmpegSpawner::succeeding`], or panic when none was set.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<OsString>>>>,
    fallback_output: Option<Vec<u8>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    /// A spawner whose unmatched calls succeed and write `output` to the output path.
    pub fn succeeding(output: &[u8]) -> Self {
        Self {
            fallback_output: Some(output.to_vec()),
            ..Default::default()
        }
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        dummy_output: Option<&[u8]>,
    ) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            dummy_output: dummy_output.map(<[u8]>::to_vec),
        });
    }

    pub fn add_success_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        output: &[u8],
    ) {
        self.add_expectation(arg_pattern, Ok(MockFfmpegProcess::new(events, 0)), Some(output));
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), None);
    }

    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        self.add_expectation(arg_pattern, Ok(MockFfmpegProcess::new(events, exit_code)), None);
    }

    /// Raw argument lists of every spawn, in order.
    pub fn get_received_calls(&self) -> Vec<Vec<OsString>> {
        self.received_calls.borrow().clone()
    }

    fn write_dummy_output(args: &[OsString], contents: &[u8]) {
        let Some(output_path) = args.last().map(PathBuf::from) else {
            log::warn!("MockFfmpegSpawner couldn't find output path in args to create dummy file.");
            return;
        };
        match std::fs::write(&output_path, contents) {
            Ok(()) => log::debug!("MockFfmpegSpawner created dummy output file: {:?}", output_path),
            Err(e) => log::error!(
                "MockFfmpegSpawner failed to create dummy output file {:?}: {}",
                output_path,
                e
            ),
        }
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<OsString> = cmd.as_inner().get_args().map(OsString::from).collect();
        self.received_calls.borrow_mut().push(args.clone());

        let matched = {
            let mut expectations = self.expectations.borrow_mut();
            expectations
                .iter()
                .position(|exp| {
                    args.iter()
                        .any(|arg| arg.to_string_lossy().contains(&exp.arg_pattern))
                })
                .map(|index| expectations.remove(index))
        };

        if let Some(expectation) = matched {
            log::debug!(
                "MockFfmpegSpawner: Matched expectation with pattern '{}'",
                expectation.arg_pattern
            );
            if expectation.result.is_ok() {
                if let Some(contents) = &expectation.dummy_output {
                    Self::write_dummy_output(&args, contents);
                }
            }
            return expectation.result;
        }

        match &self.fallback_output {
            Some(contents) => {
                Self::write_dummy_output(&args, contents);
                Ok(MockFfmpegProcess::new(Vec::new(), 0))
            }
            None => panic!("MockFfmpegSpawner: No expectation found for command args: {:?}", args),
        }
    }
}

/// Mock implementation of FileMetadataProvider.
///
/// Sizes registered with [`MockMetadataProvider::set_size`] are returned as-is;
/// other paths fall through to the real filesystem.
#[derive(Clone, Default)]
pub struct MockMetadataProvider {
    sizes: Rc<RefCell<HashMap<PathBuf, u64>>>,
}

impl MockMetadataProvider {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_size(&self, path: &Path, size: u64) {
        self.sizes.borrow_mut().insert(path.to_path_buf(), size);
    }
}

impl FileMetadataProvider for MockMetadataProvider {
    fn get_size(&self, path: &Path) -> CoreResult<u64> {
        if let Some(size) = self.sizes.borrow().get(path) {
            return Ok(*size);
        }
        Ok(std::fs::metadata(path)?.len())
    }
}
