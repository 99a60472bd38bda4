//! Async HTTP client wrapper.
//!
//! Every non-success status is turned into an [`HttpError`] carrying the
//! status code and raw body text, so commands only need one error path.

use super::request::{RequestBody, RequestDescriptor};
use super::retry::{Backoff, retry_with_backoff};
use crate::config::RetryConfig;
use crate::error::{HttpError, Result};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

/// HTTP client shared by all service calls of one invocation
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    retry: RetryConfig,
    backoff: Backoff,
}

impl HttpClient {
    /// Create a client; `timeout` of `None` waits indefinitely
    pub fn new(timeout: Option<Duration>, retry: RetryConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("revyl-ci/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().map_err(|e| HttpError::Client {
            reason: e.to_string(),
        })?;

        Ok(Self {
            inner,
            retry,
            backoff: Backoff::default(),
        })
    }

    /// Replace the delay schedule used between retries
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Send a JSON request and decode the JSON response.
    ///
    /// The descriptor's headers are merged over `Content-Type: application/json`.
    /// An empty success body decodes as `null`.
    pub async fn json_fetch(&self, url: &str, request: RequestDescriptor) -> Result<Value> {
        let retries = if request.retryable {
            self.retry.api_calls
        } else {
            0
        };
        let operation_name = format!("{} {}", request.method, url);

        retry_with_backoff(
            || self.json_fetch_once(url, &request),
            retries,
            &operation_name,
            self.backoff,
        )
        .await
    }

    async fn json_fetch_once(&self, url: &str, request: &RequestDescriptor) -> Result<Value> {
        log::debug!("{} {}", request.method, url);

        let mut builder = self.inner.request(request.method.clone(), url);
        for (name, value) in request.merged_headers() {
            builder = builder.header(name, value);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(text) => builder.body(text.clone()),
            RequestBody::Binary(bytes) => builder.body(bytes.clone()),
        };

        let response = builder.send().await.map_err(|e| transport_error(url, e))?;
        let status = response.status();
        log::debug!("{} {} -> {}", request.method, url, status);

        if !status.is_success() {
            let body = error_body(url, response).await;
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(|e| transport_error(url, e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|source| {
            HttpError::Decode {
                url: url.to_string(),
                source,
            }
            .into()
        })
    }

    /// PUT raw bytes to `url` with the given content type.
    ///
    /// The response body is only read on failure.
    pub async fn upload_file(&self, url: &str, file: Bytes, content_type: &str) -> Result<()> {
        retry_with_backoff(
            || self.upload_file_once(url, file.clone(), content_type),
            self.retry.file_uploads,
            "file upload",
            self.backoff,
        )
        .await
    }

    async fn upload_file_once(&self, url: &str, file: Bytes, content_type: &str) -> Result<()> {
        log::debug!("PUT {} ({} bytes, {})", redact_query(url), file.len(), content_type);

        let response = self
            .inner
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(file)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(url, response).await;
            return Err(HttpError::Upload {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(())
    }
}

/// Body text of a failed response; an unreadable body is logged and left empty
/// so the status still reaches the caller.
async fn error_body(url: &str, response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            log::debug!("Could not read error body from {}: {}", redact_query(url), e);
            String::new()
        }
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> HttpError {
    let url = redact_query(url);
    if err.is_timeout() {
        HttpError::Timeout { url }
    } else {
        HttpError::Transport {
            url,
            reason: err.to_string(),
        }
    }
}

/// Presigned URLs carry credentials in the query string; keep them out of logs.
fn redact_query(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => format!("{}?…", base),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_presigned_signature() {
        assert_eq!(
            redact_query("https://bucket.s3.amazonaws.com/app.apk?X-Amz-Signature=abc"),
            "https://bucket.s3.amazonaws.com/app.apk?…"
        );
        assert_eq!(redact_query("http://localhost/x"), "http://localhost/x");
    }
}
