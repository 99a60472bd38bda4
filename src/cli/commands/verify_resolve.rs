//! verify-resolve command implementation.

use super::helpers::{build_var, connect, require_flags};
use crate::cli::{RuntimeConfig, parse_args};
use crate::error::Result;
use crate::resolve::verify_resolve;

const USAGE: &str = "revyl-ci verify-resolve --version <version> [--build-var <uuid>]";

/// Execute verify-resolve
pub(super) async fn execute_verify_resolve(tokens: &[String], config: &RuntimeConfig) -> Result<()> {
    let args = parse_args(tokens);
    let [version] = require_flags(&args, ["version"], USAGE)?;

    let (env, api) = connect()?;
    let build_var = build_var(&args, &env);

    config.println(&format!("Verifying resolve for version: {}", version));
    config.println(&format!("Build Variable: {}", build_var));

    let resolution = verify_resolve(&api, &build_var, version).await?;

    config.success_println("Verification successful");
    config.println(&format!("Version: {}", resolution.version));
    config.println(&format!("Download URL: {}", resolution.download_url));
    config.println("OK");
    Ok(())
}
