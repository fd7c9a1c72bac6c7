// ============================================================================
// vidshrink-cli/src/cli.rs
// ============================================================================
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vidshrink_core::config::{DEFAULT_EXTENSION, DEFAULT_OUTPUT_PREFIX};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidshrink: Batch video compression tool",
    long_about = "Compresses every video in a directory with a fixed ffmpeg preset \
                  and reports the size reduction per file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output for troubleshooting
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write a timestamped log file into this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compresses a video file, or every matching video in a directory
    Compress(CompressArgs),
    /// Lists the available presets and the encoder flags they use
    Presets,
}

#[derive(Parser, Debug, Clone)]
pub struct CompressArgs {
    /// Input file or directory containing videos
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// Directory where compressed files will be saved
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Compression preset (h264, h265, crf, bitrate, resolution, advanced)
    #[arg(short = 'p', long, default_value = "h264", value_name = "PRESET")]
    pub preset: String,

    /// Extension of the files to pick up when the input is a directory
    #[arg(long, default_value = DEFAULT_EXTENSION, value_name = "EXT")]
    pub extension: String,

    /// Prefix prepended to each output file name
    #[arg(long, default_value = DEFAULT_OUTPUT_PREFIX, value_name = "PREFIX")]
    pub prefix: String,

    /// Path to the ffmpeg binary (defaults to `ffmpeg` on PATH)
    #[arg(long, value_name = "PATH", env = "VIDSHRINK_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Overwrite existing output files instead of failing
    #[arg(long)]
    pub overwrite: bool,

    /// Print the batch report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Parse command line arguments
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Parse from iterator (for testing)
pub fn parse_cli_from<I, T>(itr: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(itr)
}
