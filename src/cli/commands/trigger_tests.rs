//! trigger-tests command implementation.

use super::helpers::{build_var, connect, require_flags};
use crate::cli::{RuntimeConfig, parse_args};
use crate::error::Result;
use crate::git::{GitContext, UNKNOWN_REPO, UNKNOWN_SHA};
use crate::test_runs::{DEFAULT_SUITE, TestRunTrigger, trigger_test_run};

const USAGE: &str =
    "revyl-ci trigger-tests --version <version> [--build-var <uuid>] [--suite <name>]";

/// Execute trigger-tests
pub(super) async fn execute_trigger_tests(tokens: &[String], config: &RuntimeConfig) -> Result<()> {
    let args = parse_args(tokens);
    let [version] = require_flags(&args, ["version"], USAGE)?;
    let suite = args.get_str("suite").unwrap_or(DEFAULT_SUITE);

    let (env, api) = connect()?;
    let trigger = TestRunTrigger {
        build_var: build_var(&args, &env),
        version: version.to_string(),
        suite: suite.to_string(),
        context: GitContext::from_env(),
    };

    if trigger.context.repo == UNKNOWN_REPO || trigger.context.commit_sha == UNKNOWN_SHA {
        config.warning_println("GITHUB_REPOSITORY or GITHUB_SHA not set, sending placeholder context");
    }
    config.println(&format!("Triggering test run for version: {}", trigger.version));
    config.println(&format!("Build Variable: {}", trigger.build_var));
    config.println(&format!("Suite: {}", trigger.suite));
    config.json_println("Context", &serde_json::to_value(&trigger.context)?);

    let response = trigger_test_run(&api, &trigger).await?;

    config.success_println("Test run triggered successfully");
    if let Some(run_id) = &response.run_id {
        config.println(&format!("Run ID: {}", run_id));
    }
    if let Some(url) = &response.url {
        config.println(&format!("Run URL: {}", url));
    }
    config.json_println("Response", &response.raw);
    Ok(())
}
