//! Command line interface for revyl-ci.
//!
//! clap selects the subcommand, [`flags`] reads its raw tokens, and
//! [`commands`] runs the matching workflow and maps the outcome to an exit code.

mod args;
pub mod commands;
pub mod flags;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use commands::execute_command;
pub use flags::{FlagValue, HeaderMap, ParsedArgs, parse_args, parse_headers_from_args};
pub use output::OutputManager;

use clap::error::ErrorKind;

/// Main CLI entry point, returns the process exit code
pub async fn run() -> i32 {
    match Args::try_parse_args() {
        Ok(args) => execute_command(args).await,
        Err(e) => {
            let _ = e.print();
            parse_failure_code(e.kind())
        }
    }
}

/// Help and version requests succeed; every other parse failure is exit 1
fn parse_failure_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
