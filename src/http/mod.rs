//! HTTP transport for the build service and presigned storage URLs.

mod client;
mod request;
mod retry;

pub use client::HttpClient;
pub use request::{JSON_CONTENT_TYPE, RequestBody, RequestDescriptor};
pub use retry::{Backoff, retry_with_backoff};
