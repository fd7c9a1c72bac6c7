//! File discovery module for finding video files to process.
//!
//! This module handles the discovery of video files eligible for processing.
//! Only the top level of the input directory is searched, and the extension
//! comparison is case-insensitive.

use crate::error::{CoreError, CoreResult};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Checks whether `path` is an existing file with the given extension.
#[must_use]
pub fn is_processable_file(path: &Path, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext_str| ext_str.eq_ignore_ascii_case(extension))
}

/// Finds video files eligible for processing in the specified directory.
///
/// Scans the top level of `input_dir` for files whose extension matches
/// `extension` (case-insensitive). Subdirectories are not searched. The
/// result is sorted so batch runs are deterministic.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - The matching files
/// * `Err(CoreError::Io)` - If the directory cannot be read
/// * `Err(CoreError::NoFilesFound)` - If nothing matches
///
/// # Examples
///
/// ```rust,no_run
/// use vidshrink_core::find_processable_files;
/// use std::path::Path;
///
/// match find_processable_files(Path::new("/path/to/videos"), "mp4") {
///     Ok(files) => println!("Found {} video files", files.len()),
///     Err(e) => println!("Error finding video files: {}", e),
/// }
/// ```
pub fn find_processable_files(input_dir: &Path, extension: &str) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            is_processable_file(&path, extension).then_some(path)
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    files.sort();
    Ok(files)
}

/// Derives the output path for `input`: `<output_dir>/<prefix><file name>`.
///
/// The file name is copied byte for byte, so names that are not valid UTF-8
/// keep their original bytes.
pub fn output_path_for(input: &Path, output_dir: &Path, prefix: &str) -> CoreResult<PathBuf> {
    let mut filename = OsString::from(prefix);
    filename.push(crate::utils::get_filename_safe(input)?);
    Ok(output_dir.join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_prefix() {
        let out = output_path_for(
            Path::new("/videos/in/clip.mp4"),
            Path::new("/videos/out"),
            "compressed_",
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/videos/out/compressed_clip.mp4"));
    }

    #[test]
    fn output_path_requires_filename() {
        assert!(output_path_for(Path::new("/"), Path::new("/out"), "x_").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn output_path_keeps_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"/videos/in/caf\xe9.mp4"));
        let out = output_path_for(input, Path::new("/videos/out"), "compressed_").unwrap();
        assert_eq!(
            out.as_os_str().as_bytes(),
            b"/videos/out/compressed_caf\xe9.mp4"
        );
    }
}
