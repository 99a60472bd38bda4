//! Publish a version whose artifact the service downloads from a URL.

use crate::api::{FromUrlRequest, RevylApi};
use crate::cli::HeaderMap;
use crate::error::Result;
use serde_json::Value;

/// Inputs of a publish-from-url call
#[derive(Debug, Clone)]
pub struct FromUrlPublish {
    /// Build variable receiving the version
    pub build_var: String,
    /// Artifact location
    pub from_url: String,
    /// Version being published
    pub version: String,
    /// Headers the service must send when downloading
    pub headers: HeaderMap,
    /// Metadata stored with the version
    pub metadata: Value,
}

/// Register the version and return the service's record of it
pub async fn publish_from_url(api: &RevylApi, publish: FromUrlPublish) -> Result<Value> {
    let body = FromUrlRequest {
        from_url: publish.from_url,
        version: publish.version,
        metadata: publish.metadata,
        headers: publish.headers,
    };
    log::debug!(
        "Publishing {} from {} into {}",
        body.version,
        body.from_url,
        publish.build_var
    );
    api.publish_from_url(&publish.build_var, &body).await
}
