//! publish-from-url command implementation.

use super::helpers::{build_var, connect, parse_metadata, require_flags};
use crate::cli::{RuntimeConfig, parse_args, parse_headers_from_args};
use crate::error::Result;
use crate::publish::{FromUrlPublish, publish_from_url};

const USAGE: &str = r#"revyl-ci publish-from-url --from-url <url> --version <version> [--build-var <uuid>] [--header "Key: Value"] [--metadata <json>]"#;

/// Execute publish-from-url
pub(super) async fn execute_publish_from_url(tokens: &[String], config: &RuntimeConfig) -> Result<()> {
    let args = parse_args(tokens);
    let [from_url, version] = require_flags(&args, ["from-url", "version"], USAGE)?;
    let headers = parse_headers_from_args(tokens);
    let metadata = parse_metadata(&args)?;

    let (env, api) = connect()?;
    let build_var = build_var(&args, &env);

    config.println(&format!("Publishing from URL: {}", from_url));
    config.println(&format!("Version: {}", version));
    config.println(&format!("Build Variable: {}", build_var));
    config.json_println("Custom Headers", &serde_json::to_value(&headers)?);
    config.json_println("Metadata", &metadata);

    let response = publish_from_url(
        &api,
        FromUrlPublish {
            build_var,
            from_url: from_url.to_string(),
            version: version.to_string(),
            headers,
            metadata,
        },
    )
    .await?;

    config.success_println("Successfully published from URL");
    config.json_println("Response", &response);
    Ok(())
}
