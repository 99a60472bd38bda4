//! Command line argument parsing.
//!
//! clap only selects the subcommand. Each subcommand's tokens are passed
//! through untouched and read with [`parse_args`](super::flags::parse_args),
//! so workflows keep the `--name value` / `--flag` form they already use.

use clap::{Parser, Subcommand};

/// CI helper for the Revyl build service
#[derive(Parser, Debug)]
#[command(
    name = "revyl-ci",
    version,
    about = "Publish builds, trigger test runs and verify version resolution",
    long_about = "Publish builds, trigger test runs and verify version resolution against the Revyl build service.

Environment:
  REVYL_BASE_URL            service base URL (required)
  REVYL_API_KEY             API key (required)
  REVYL_BUILD_VAR_ANDROID   build variable used when --build-var is omitted
  REVYL_HTTP_TIMEOUT_SECS   per-request timeout, 0 disables (default 300)
  REVYL_RETRY_API           retries for repeatable API calls (default 0)
  REVYL_RETRY_UPLOADS       retries for presigned uploads (default 0)"
)]
pub struct Args {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Publish a version the service downloads from a URL
    ///
    /// --from-url <url> --version <v> [--build-var <id>] [--header "K: V"]... [--metadata <json>]
    #[command(name = "publish-from-url")]
    PublishFromUrl {
        /// Command flags
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FLAGS")]
        tokens: Vec<String>,
    },

    /// Publish a local file through a presigned upload URL
    ///
    /// --file <path> --version <v> [--build-var <id>] [--filename <name>] [--metadata <json>]
    #[command(name = "publish-presigned")]
    PublishPresigned {
        /// Command flags
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FLAGS")]
        tokens: Vec<String>,
    },

    /// Trigger a test run against a pinned version
    ///
    /// --version <v> [--build-var <id>] [--suite <name>]
    #[command(name = "trigger-tests")]
    TriggerTests {
        /// Command flags
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FLAGS")]
        tokens: Vec<String>,
    },

    /// Verify that a version resolves to a download URL
    ///
    /// --version <v> [--build-var <id>]
    #[command(name = "verify-resolve")]
    VerifyResolve {
        /// Command flags
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FLAGS")]
        tokens: Vec<String>,
    },
}

impl Args {
    /// Parse command line arguments without exiting on failure
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

impl Command {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::PublishFromUrl { .. } => "publish-from-url",
            Command::PublishPresigned { .. } => "publish-presigned",
            Command::TriggerTests { .. } => "trigger-tests",
            Command::VerifyResolve { .. } => "verify-resolve",
        }
    }

    /// What the command does, for failure messages
    pub fn action(&self) -> &'static str {
        match self {
            Command::PublishFromUrl { .. } => "publish from URL",
            Command::PublishPresigned { .. } => "publish via presigned upload",
            Command::TriggerTests { .. } => "trigger test run",
            Command::VerifyResolve { .. } => "verify resolve",
        }
    }

    /// Raw flag tokens
    pub fn tokens(&self) -> &[String] {
        match self {
            Command::PublishFromUrl { tokens }
            | Command::PublishPresigned { tokens }
            | Command::TriggerTests { tokens }
            | Command::VerifyResolve { tokens } => tokens,
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new() -> Self {
        Self {
            output: super::OutputManager::new(false),
        }
    }

    /// Runtime configuration that suppresses everything but errors
    pub fn quiet() -> Self {
        Self {
            output: super::OutputManager::new(true),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print progress message
    pub fn progress_println(&self, message: &str) {
        let _ = self.output.progress(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }

    /// Print `label` followed by pretty-printed JSON
    pub fn json_println(&self, label: &str, value: &serde_json::Value) {
        let rendered =
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        self.println(&format!("{}: {}", label, rendered));
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommand_keeps_flag_tokens_verbatim() {
        let args = Args::try_parse_from([
            "revyl-ci",
            "verify-resolve",
            "--version",
            "1.0.0",
            "--build-var",
            "bv-1",
        ])
        .unwrap();
        assert_eq!(args.command.name(), "verify-resolve");
        assert_eq!(
            args.command.tokens(),
            ["--version", "1.0.0", "--build-var", "bv-1"]
        );
    }

    #[test]
    fn repeated_headers_pass_through() {
        let args = Args::try_parse_from([
            "revyl-ci",
            "publish-from-url",
            "--from-url",
            "https://ci.example.com/app.apk",
            "--header",
            "Authorization: Bearer x",
            "--header",
            "X-Trace: 1",
        ])
        .unwrap();
        assert_eq!(args.command.tokens().len(), 6);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["revyl-ci", "deploy"]).is_err());
    }
}
