//! publish-presigned command implementation.

use super::helpers::{build_var, connect, parse_metadata, require_flags};
use crate::cli::{RuntimeConfig, parse_args};
use crate::error::Result;
use crate::publish::{PresignedPublish, publish_presigned};
use std::path::PathBuf;

const USAGE: &str = "revyl-ci publish-presigned --file <path> --version <version> [--build-var <uuid>] [--filename <override>] [--metadata <json>]";

/// Execute publish-presigned
pub(super) async fn execute_publish_presigned(tokens: &[String], config: &RuntimeConfig) -> Result<()> {
    let args = parse_args(tokens);
    let [file, version] = require_flags(&args, ["file", "version"], USAGE)?;
    let file = PathBuf::from(file);
    let file_name = match args.get_str("filename") {
        Some(name) => name.to_string(),
        None => file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string()),
    };
    let metadata = parse_metadata(&args)?;

    let (env, api) = connect()?;
    let build_var = build_var(&args, &env);

    config.println(&format!("Publishing file: {}", file.display()));
    config.println(&format!("Version: {}", version));
    config.println(&format!("Build Variable: {}", build_var));
    config.println(&format!("Filename: {}", file_name));
    config.json_println("Metadata", &metadata);

    let published = publish_presigned(
        &api,
        PresignedPublish {
            build_var,
            version: version.to_string(),
            file,
            file_name,
            metadata,
        },
        config,
    )
    .await?;

    log::debug!(
        "Upload {} finalized after {} checkpoint(s)",
        published.version_id,
        published.state.checkpoints.len()
    );
    config.success_println("Successfully published via presigned upload");
    config.json_println("Response", &published.record);
    Ok(())
}
