//! Command execution.
//!
//! Each command runs to completion or fails as a whole; every failure is
//! printed once here and becomes exit code 1.

mod helpers;
mod publish_from_url;
mod publish_presigned;
mod trigger_tests;
mod verify_resolve;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{CliError, Result, RevylError};

use publish_from_url::execute_publish_from_url;
use publish_presigned::execute_publish_presigned;
use trigger_tests::execute_trigger_tests;
use verify_resolve::execute_verify_resolve;

/// Run the selected command and return the process exit code
pub async fn execute_command(args: Args) -> i32 {
    let config = RuntimeConfig::new();
    match dispatch(&args.command, &config).await {
        Ok(()) => 0,
        Err(e) => {
            report_failure(&args.command, &e, &config);
            1
        }
    }
}

async fn dispatch(command: &Command, config: &RuntimeConfig) -> Result<()> {
    let tokens = command.tokens();
    match command {
        Command::PublishFromUrl { .. } => execute_publish_from_url(tokens, config).await,
        Command::PublishPresigned { .. } => execute_publish_presigned(tokens, config).await,
        Command::TriggerTests { .. } => execute_trigger_tests(tokens, config).await,
        Command::VerifyResolve { .. } => execute_verify_resolve(tokens, config).await,
    }
}

fn report_failure(command: &Command, error: &RevylError, config: &RuntimeConfig) {
    log::debug!("Command '{}' failed: {:?}", command.name(), error);

    match error {
        RevylError::Cli(CliError::Usage { .. }) => config.error_println(&error.to_string()),
        RevylError::Cli(_) | RevylError::Config(_) => {
            config.error_println(&format!("Error: {}", error))
        }
        RevylError::UploadInterrupted { phase, source } => config.error_println(&format!(
            "Failed to {} during '{}': {}",
            command.action(),
            phase,
            source
        )),
        _ => config.error_println(&format!("Failed to {}: {}", command.action(), error)),
    }

    let suggestions = error.recovery_suggestions();
    if !suggestions.is_empty() {
        config.println("\n💡 Recovery suggestions:");
        for suggestion in suggestions {
            config.indent(&format!("• {}", suggestion));
        }
    }
}
