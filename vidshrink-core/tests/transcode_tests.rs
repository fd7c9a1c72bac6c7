// vidshrink-core/tests/transcode_tests.rs

use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use vidshrink_core::error::{CoreError, ErrorKind};
use vidshrink_core::external::mocks::{MockFfmpegProcess, MockFfmpegSpawner};
use vidshrink_core::processing::{TranscodeJob, TranscodeOptions, ffmpeg_args, run_transcode};
use vidshrink_core::Preset;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn create_dummy_file(dir: &Path, filename: &str) -> PathBuf {
    let file_path = dir.join(filename);
    std::fs::write(&file_path, b"dummy content").expect("Failed to create dummy file");
    file_path
}

fn os_strings(args: Vec<String>) -> Vec<OsString> {
    args.into_iter().map(OsString::from).collect()
}

#[test]
fn ffmpeg_args_wrap_preset_flags() {
    let job = TranscodeJob::new(
        PathBuf::from("in/clip.mp4"),
        PathBuf::from("out/compressed_clip.mp4"),
        Preset::Crf,
    );

    let args = ffmpeg_args(&job, false);
    let mut expected: Vec<OsString> = ["-hide_banner", "-n", "-i", "in/clip.mp4"]
        .into_iter()
        .map(OsString::from)
        .collect();
    expected.extend(os_strings(Preset::Crf.encoder_args()));
    expected.push("out/compressed_clip.mp4".into());
    assert_eq!(args, expected);

    assert_eq!(ffmpeg_args(&job, true)[1], "-y");
}

#[cfg(unix)]
#[test]
fn ffmpeg_args_keep_non_utf8_paths() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let input = PathBuf::from(OsStr::from_bytes(b"in/caf\xe9.mp4"));
    let output = PathBuf::from(OsStr::from_bytes(b"out/compressed_caf\xe9.mp4"));
    let job = TranscodeJob::new(input.clone(), output.clone(), Preset::H264);

    let args = ffmpeg_args(&job, false);
    assert_eq!(args[3], input.into_os_string());
    assert_eq!(args.last(), Some(&output.into_os_string()));
}

#[test]
fn successful_transcode_passes_args_to_spawner() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let input = create_dummy_file(input_dir.path(), "clip.mp4");
    let output = output_dir.path().join("compressed_clip.mp4");
    let job = TranscodeJob::new(input.clone(), output.clone(), Preset::H265);

    let spawner = MockFfmpegSpawner::succeeding(b"small");
    run_transcode(&spawner, &job, &TranscodeOptions::default())?;

    assert!(output.is_file());

    let calls = spawner.get_received_calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.last().map(PathBuf::from), Some(output));
    let flags = os_strings(Preset::H265.encoder_args());
    assert!(call.windows(flags.len()).any(|w| w == flags.as_slice()));
    assert!(call.contains(&input.into_os_string()));
    Ok(())
}

#[test]
fn missing_output_directory_is_not_created() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.mp4");
    let output_parent = dir.path().join("nested");
    let job = TranscodeJob::new(input, output_parent.join("compressed_clip.mp4"), Preset::H264);

    let spawner = MockFfmpegSpawner::succeeding(b"small");
    let err = run_transcode(&spawner, &job, &TranscodeOptions::default()).unwrap_err();

    assert!(matches!(err, CoreError::PathError(_)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Filesystem);
    assert!(!output_parent.exists());
    assert!(spawner.get_received_calls().is_empty());
    Ok(())
}

#[test]
fn missing_input_is_filesystem_error_without_spawning() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let job = TranscodeJob::new(
        dir.path().join("missing.mp4"),
        dir.path().join("compressed_missing.mp4"),
        Preset::H264,
    );

    let spawner = MockFfmpegSpawner::new();
    let err = run_transcode(&spawner, &job, &TranscodeOptions::default()).unwrap_err();

    assert!(matches!(err, CoreError::InputNotFound(_)));
    assert_eq!(err.kind(), ErrorKind::Filesystem);
    assert!(spawner.get_received_calls().is_empty());
    Ok(())
}

#[test]
fn empty_input_is_rejected_without_spawning() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("empty.mp4");
    std::fs::File::create(&input)?;
    let job = TranscodeJob::new(input, dir.path().join("compressed_empty.mp4"), Preset::H264);

    let spawner = MockFfmpegSpawner::succeeding(b"small");
    let err = run_transcode(&spawner, &job, &TranscodeOptions::default()).unwrap_err();

    assert!(matches!(err, CoreError::ZeroSizeInput(_)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Filesystem);
    assert!(spawner.get_received_calls().is_empty());
    Ok(())
}

#[test]
fn non_zero_exit_reports_ffmpeg_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "broken.mp4");
    let output = dir.path().join("compressed_broken.mp4");
    let job = TranscodeJob::new(input, output, Preset::H264);

    let spawner = MockFfmpegSpawner::new();
    spawner.add_exit_error_expectation(
        "broken.mp4",
        vec![
            FfmpegEvent::Log(LogLevel::Info, "Input #0".to_string()),
            FfmpegEvent::Log(LogLevel::Error, "moov atom not found".to_string()),
        ],
        1,
    );

    let err = run_transcode(&spawner, &job, &TranscodeOptions::default()).unwrap_err();
    match &err {
        CoreError::CommandFailed(name, status, details) => {
            assert_eq!(name, "ffmpeg");
            assert!(!status.success());
            assert!(details.contains("moov atom not found"));
            assert!(!details.contains("Input #0"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::ExternalTool);
    Ok(())
}

#[test]
fn broken_event_stream_still_reaps_ffmpeg() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.mp4");
    let job = TranscodeJob::new(input, dir.path().join("compressed_clip.mp4"), Preset::H264);

    let process = MockFfmpegProcess::with_stream_error(
        CoreError::CommandWait("ffmpeg".to_string(), io::Error::other("stdout closed")),
        1,
    );
    let spawner = MockFfmpegSpawner::new();
    spawner.add_expectation("clip.mp4", Ok(process.clone()), None);

    let err = run_transcode(&spawner, &job, &TranscodeOptions::default()).unwrap_err();

    assert!(matches!(err, CoreError::CommandWait(_, _)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::ExternalTool);
    assert!(process.was_waited());
    Ok(())
}

#[test]
fn spawn_failure_is_external_tool_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.mp4");
    let job = TranscodeJob::new(input, dir.path().join("compressed_clip.mp4"), Preset::H264);

    let spawner = MockFfmpegSpawner::new();
    spawner.add_spawn_error_expectation("clip.mp4", CoreError::ToolNotFound("ffmpeg".to_string()));

    let err = run_transcode(&spawner, &job, &TranscodeOptions::default()).unwrap_err();
    assert!(matches!(err, CoreError::ToolNotFound(_)));
    assert_eq!(err.kind(), ErrorKind::ExternalTool);
    Ok(())
}

#[test]
fn success_without_output_file_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.mp4");
    let job = TranscodeJob::new(input, dir.path().join("compressed_clip.mp4"), Preset::H264);

    let spawner = MockFfmpegSpawner::new();
    let process = MockFfmpegProcess::new(Vec::new(), 0);
    spawner.add_expectation("clip.mp4", Ok(process.clone()), None);

    let err = run_transcode(&spawner, &job, &TranscodeOptions::default()).unwrap_err();
    assert!(matches!(err, CoreError::OutputMissing(_)));
    assert!(process.was_waited());
    Ok(())
}

#[test]
fn missing_ffmpeg_binary_is_tool_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "clip.mp4");
    let job = TranscodeJob::new(input, dir.path().join("compressed_clip.mp4"), Preset::H264);
    let options = TranscodeOptions {
        ffmpeg_program: dir.path().join("no-such-ffmpeg"),
        overwrite: false,
    };

    let err = run_transcode(&vidshrink_core::external::SidecarSpawner, &job, &options).unwrap_err();
    assert!(matches!(err, CoreError::ToolNotFound(_)), "got {err:?}");
    Ok(())
}
