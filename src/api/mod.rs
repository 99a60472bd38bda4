//! Client for the build service endpoints used by the CI commands.
//!
//! `RevylApi` owns the base URL and API key and knows each endpoint's path
//! and body; the [`HttpClient`] underneath handles transport and status
//! checks. Responses come back typed, but contract checks are left to the
//! workflow that needs them.

mod types;

pub use types::{
    CompleteUploadRequest, FromUrlRequest, ResolveRequest, ResolveResponse, TestRunRequest,
    TestRunResponse, TestSelection, TestTarget, UploadSlotResponse, VersionId, display_value,
    is_present,
};

use crate::config::EnvConfig;
use crate::error::{HttpError, Result};
use crate::http::{HttpClient, RequestDescriptor};
use serde_json::Value;
use url::Url;

/// Authenticated client for one service base URL
#[derive(Debug, Clone)]
pub struct RevylApi {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl RevylApi {
    /// Create a client; a trailing slash on `base_url` is ignored
    pub fn new(http: HttpClient, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &EnvConfig) -> Result<Self> {
        let http = HttpClient::new(config.timeout, config.retry)?;
        Ok(Self::new(http, &config.base_url, &config.api_key))
    }

    /// Underlying HTTP client, for requests outside the service (presigned URLs)
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST {base}/vars/{id}/versions/from-url`
    pub fn from_url_endpoint(&self, build_var: &str) -> String {
        format!("{}/vars/{}/versions/from-url", self.base_url, build_var)
    }

    /// `POST {base}/vars/{id}/versions/upload-url?version=..&file_name=..`
    pub fn upload_url_endpoint(
        &self,
        build_var: &str,
        version: &str,
        file_name: &str,
    ) -> Result<String> {
        let raw = format!("{}/vars/{}/versions/upload-url", self.base_url, build_var);
        let mut url = Url::parse(&raw).map_err(|source| HttpError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;
        url.query_pairs_mut()
            .append_pair("version", version)
            .append_pair("file_name", file_name);
        Ok(url.into())
    }

    /// `POST {base}/versions/{id}/complete-upload`
    pub fn complete_upload_endpoint(&self, version_id: &VersionId) -> String {
        format!("{}/versions/{}/complete-upload", self.base_url, version_id)
    }

    /// `POST {base}/resolve?include_download_url=true`
    pub fn resolve_endpoint(&self) -> String {
        format!("{}/resolve?include_download_url=true", self.base_url)
    }

    /// `POST {base without its first "/builds"}/v1/test-runs`
    ///
    /// Test runs live on the API root rather than under the builds prefix.
    pub fn test_runs_endpoint(&self) -> String {
        format!("{}/v1/test-runs", self.base_url.replacen("/builds", "", 1))
    }

    fn authed_post(&self) -> RequestDescriptor {
        RequestDescriptor::post().bearer(&self.api_key)
    }

    /// Ask the service to fetch an artifact from a URL into a new version
    pub async fn publish_from_url(&self, build_var: &str, body: &FromUrlRequest) -> Result<Value> {
        let request = self.authed_post().json(body)?;
        self.http
            .json_fetch(&self.from_url_endpoint(build_var), request)
            .await
    }

    /// Reserve a version slot and obtain its presigned upload URL.
    ///
    /// Never retried: a lost response may still have reserved a slot.
    pub async fn request_upload_slot(
        &self,
        build_var: &str,
        version: &str,
        file_name: &str,
    ) -> Result<UploadSlotResponse> {
        let url = self.upload_url_endpoint(build_var, version, file_name)?;
        let value = self.http.json_fetch(&url, self.authed_post()).await?;
        // Shape problems are reported as a contract violation by the caller.
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Finalize an uploaded version
    pub async fn complete_upload(&self, body: &CompleteUploadRequest) -> Result<Value> {
        let request = self.authed_post().json(body)?.retryable(true);
        self.http
            .json_fetch(&self.complete_upload_endpoint(&body.version_id), request)
            .await
    }

    /// Resolve a pinned version, including its download URL
    pub async fn resolve(&self, body: &ResolveRequest) -> Result<ResolveResponse> {
        let request = self.authed_post().json(body)?.retryable(true);
        let value = self.http.json_fetch(&self.resolve_endpoint(), request).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Start a test run
    pub async fn trigger_test_run(&self, body: &TestRunRequest) -> Result<TestRunResponse> {
        let request = self.authed_post().json(body)?;
        let value = self.http.json_fetch(&self.test_runs_endpoint(), request).await?;
        Ok(TestRunResponse::from_value(value))
    }
}
