//! Shared helper functions for command execution.

use crate::api::RevylApi;
use crate::cli::ParsedArgs;
use crate::config::{BUILD_VAR_VAR, EnvConfig, required_env};
use crate::error::{CliError, Result};
use serde_json::Value;

/// Values of the named flags, or a usage error if any is missing
pub(super) fn require_flags<'a, const N: usize>(
    args: &'a ParsedArgs,
    names: [&str; N],
    usage: &str,
) -> Result<[&'a str; N]> {
    let mut values = [""; N];
    for (slot, name) in values.iter_mut().zip(names) {
        *slot = args.get_str(name).ok_or_else(|| CliError::Usage {
            usage: usage.to_string(),
        })?;
    }
    Ok(values)
}

/// `--build-var`, else `REVYL_BUILD_VAR_ANDROID` (exits if that is unset too)
pub(super) fn build_var(args: &ParsedArgs, env: &EnvConfig) -> String {
    match env.build_var(args.get_str("build-var")) {
        Some(id) => id,
        None => required_env(BUILD_VAR_VAR),
    }
}

/// Parse `--metadata`, defaulting to an empty object
pub(super) fn parse_metadata(args: &ParsedArgs) -> Result<Value> {
    match args.get_str("metadata") {
        None => Ok(Value::Object(Default::default())),
        Some(raw) => Ok(serde_json::from_str(raw)
            .map_err(|source| CliError::InvalidMetadata { source })?),
    }
}

/// Load the environment (exiting on missing values) and build the API client
pub(super) fn connect() -> Result<(EnvConfig, RevylApi)> {
    let env = EnvConfig::load_or_exit();
    log::debug!(
        "Using {} (timeout {:?}, retries {:?})",
        env.base_url,
        env.timeout,
        env.retry
    );
    let api = RevylApi::from_config(&env)?;
    Ok((env, api))
}
