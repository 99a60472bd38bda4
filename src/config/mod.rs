//! Environment-sourced configuration.
//!
//! Everything a command needs from the environment is read once, up front,
//! into an [`EnvConfig`]. A missing required variable ends the process with
//! exit code 1 before any request is made.

mod retry;

pub use retry::{MAX_RETRIES, RetryConfig};

use crate::cli::OutputManager;
use crate::error::ConfigError;
use std::time::Duration;

/// Base URL of the build service
pub const BASE_URL_VAR: &str = "REVYL_BASE_URL";
/// API key sent as a bearer token
pub const API_KEY_VAR: &str = "REVYL_API_KEY";
/// Build variable used when `--build-var` is not given
pub const BUILD_VAR_VAR: &str = "REVYL_BUILD_VAR_ANDROID";
/// Per-request timeout in seconds, `0` disables
pub const TIMEOUT_VAR: &str = "REVYL_HTTP_TIMEOUT_SECS";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Validated configuration for one invocation
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Service base URL without trailing slash
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// Build variable used when `--build-var` is not given
    pub default_build_var: Option<String>,
    /// Per-request timeout, `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Retry limits
    pub retry: RetryConfig,
}

impl EnvConfig {
    /// Load configuration from an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup_required(&lookup, BASE_URL_VAR)?
            .trim_end_matches('/')
            .to_string();
        let api_key = lookup_required(&lookup, API_KEY_VAR)?;
        let default_build_var = lookup(BUILD_VAR_VAR).filter(|v| !v.is_empty());

        let timeout = match lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            None => Some(DEFAULT_TIMEOUT),
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnv {
                    name: TIMEOUT_VAR.to_string(),
                    reason: e.to_string(),
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        Ok(Self {
            base_url,
            api_key,
            default_build_var,
            timeout,
            retry: RetryConfig::from_lookup(&lookup),
        })
    }

    /// Load configuration from the process environment or exit with status 1
    pub fn load_or_exit() -> Self {
        Self::from_lookup(env_lookup).unwrap_or_else(|e| exit_with_config_error(&e))
    }

    /// `flag` if given, else the environment default
    pub fn build_var(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::to_string)
            .or_else(|| self.default_build_var.clone())
    }
}

/// Read a required environment variable or exit the process with status 1.
pub fn required_env(name: &str) -> String {
    lookup_required(&env_lookup, name).unwrap_or_else(|e| exit_with_config_error(&e))
}

/// Read a required variable through `lookup`; unset and empty are both missing.
pub fn lookup_required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingEnv {
            name: name.to_string(),
        })
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn exit_with_config_error(err: &ConfigError) -> ! {
    log::debug!("Configuration error: {:?}", err);
    OutputManager::new(false).error(&format!("Error: {}", err));
    std::process::exit(1)
}
