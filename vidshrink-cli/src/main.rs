//! Main entry point for the vidshrink CLI application.
//!
//! This handles command-line argument parsing, logging setup, and dispatching
//! to the appropriate command handlers. Exit code is 0 when every file was
//! compressed and 1 when any file failed or the run could not start.

use vidshrink_cli::error::CliResult;
use vidshrink_cli::logging::init_logging;
use vidshrink_cli::{Cli, Commands, parse_cli, run_compress, run_presets};

use log::LevelFilter;
use std::process;

fn main() {
    let cli = parse_cli();
    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            log::debug!("Fatal error: {e:?}");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but some files failed.
fn run(cli: Cli) -> CliResult<bool> {
    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let json = matches!(&cli.command, Commands::Compress(args) if args.json);
    if let Some(log_path) = init_logging(log_level, cli.log_dir.as_deref(), json)? {
        log::debug!("Writing run log to {}", log_path.display());
    }

    match cli.command {
        Commands::Compress(args) => Ok(run_compress(args)?.all_succeeded()),
        Commands::Presets => {
            run_presets();
            Ok(true)
        }
    }
}
