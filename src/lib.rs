//! # revyl-ci
//!
//! CI helper for the Revyl build service.
//!
//! ## Commands
//!
//! - **publish-from-url**: register a version the service downloads itself
//! - **publish-presigned**: upload a local artifact through a presigned URL
//!   (reserve slot → PUT → complete)
//! - **trigger-tests**: start a suite run against a pinned version
//! - **verify-resolve**: check that a pinned version resolves to a download URL
//!
//! ## Usage
//!
//! ```bash
//! revyl-ci publish-presigned --file app-release.apk --version 1.4.0
//! revyl-ci verify-resolve --version 1.4.0 --build-var 6f1c...
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod http;
pub mod publish;
pub mod resolve;
pub mod state;
pub mod test_runs;

pub use api::RevylApi;
pub use cli::{HeaderMap, ParsedArgs, parse_args, parse_headers_from_args};
pub use config::{EnvConfig, RetryConfig, required_env};
pub use error::{Result, RevylError};
pub use git::GitContext;
pub use http::{HttpClient, RequestDescriptor};
