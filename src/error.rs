//! Error types for revyl_ci operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use thiserror::Error;

/// Result type alias for revyl_ci operations
pub type Result<T> = std::result::Result<T, RevylError>;

/// Main error type for all revyl_ci operations
#[derive(Error, Debug)]
pub enum RevylError {
    /// Configuration errors
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// HTTP request errors
    #[error("{0}")]
    Http(#[from] HttpError),

    /// Remote response did not satisfy the expected contract
    #[error("{0}")]
    Contract(#[from] ContractError),

    /// CLI argument errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Presigned upload stopped part way through
    #[error("{source} (during '{phase}')")]
    UploadInterrupted {
        /// Label of the step that was in progress
        phase: &'static str,
        /// What went wrong in that step
        #[source]
        source: Box<RevylError>,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is unset or empty
    #[error("Required environment variable {name} is not set")]
    MissingEnv {
        /// Variable name
        name: String,
    },

    /// Environment variable holds a value that cannot be used
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnv {
        /// Variable name
        name: String,
        /// Reason for the error
        reason: String,
    },
}

/// HTTP errors
#[derive(Error, Debug)]
pub enum HttpError {
    /// Non-success status from a JSON endpoint
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Non-success status from a presigned upload
    #[error("Upload failed: HTTP {status}: {body}")]
    Upload {
        /// Response status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Request did not complete within the configured timeout
    #[error("Request to {url} timed out")]
    Timeout {
        /// Request URL
        url: String,
    },

    /// Connection or protocol failure
    #[error("Request to {url} failed: {reason}")]
    Transport {
        /// Request URL
        url: String,
        /// Reason for the error
        reason: String,
    },

    /// Endpoint URL could not be constructed
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Parse error
        #[source]
        source: url::ParseError,
    },

    /// Success response whose body is not valid JSON
    #[error("Invalid JSON in response from {url}: {source}")]
    Decode {
        /// Request URL
        url: String,
        /// Decode error
        #[source]
        source: serde_json::Error,
    },

    /// Client construction failed
    #[error("Failed to build HTTP client: {reason}")]
    Client {
        /// Reason for the error
        reason: String,
    },
}

/// Response contract violations
#[derive(Error, Debug)]
pub enum ContractError {
    /// Upload slot response lacks `upload_url` or `version_id`
    #[error("Invalid response from upload-url endpoint")]
    InvalidUploadSlot,

    /// Resolve response lacks `version`
    #[error("Response missing version field")]
    MissingVersion,

    /// Resolve response names a different version
    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Requested version
        expected: String,
        /// Version the service returned
        actual: String,
    },

    /// Resolve response lacks `download_url`
    #[error("Response missing download_url field")]
    MissingDownloadUrl,
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Required flags are missing; carries the command's usage line
    #[error("Usage: {usage}")]
    Usage {
        /// Usage line for the command
        usage: String,
    },

    /// `--metadata` was not valid JSON
    #[error("Invalid JSON in --metadata argument")]
    InvalidMetadata {
        /// Parse error
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError {
    /// Whether a retry could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            HttpError::Timeout { .. } | HttpError::Transport { .. } => true,
            HttpError::Status { status, .. } | HttpError::Upload { status, .. } => {
                matches!(status, 408 | 429) || *status >= 500
            }
            _ => false,
        }
    }
}

impl RevylError {
    /// The underlying error, looking through any step context
    pub fn root(&self) -> &RevylError {
        match self {
            RevylError::UploadInterrupted { source, .. } => source.root(),
            other => other,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            RevylError::UploadInterrupted { source, .. } => source.recovery_suggestions(),
            RevylError::Config(ConfigError::MissingEnv { name }) => vec![
                format!("Export {} before running the command", name),
                "In GitHub Actions, map the secret into the step's env block".to_string(),
            ],
            RevylError::Http(HttpError::Status { status: 401 | 403, .. }) => vec![
                "Verify REVYL_API_KEY is valid and not expired".to_string(),
            ],
            RevylError::Http(HttpError::Status { status: 404, .. }) => vec![
                "Check the build variable id and REVYL_BASE_URL".to_string(),
            ],
            RevylError::Http(HttpError::Timeout { .. }) => vec![
                "Raise REVYL_HTTP_TIMEOUT_SECS or set it to 0 to disable the timeout".to_string(),
            ],
            RevylError::Http(HttpError::Upload { .. }) => vec![
                "Presigned URLs expire; re-run the command to request a new one".to_string(),
            ],
            RevylError::Contract(ContractError::VersionMismatch { expected, .. }) => vec![
                format!("Confirm version {} was published to this build variable", expected),
            ],
            _ => Vec::new(),
        }
    }

    /// Check if this error is recoverable by retrying the same request
    pub fn is_recoverable(&self) -> bool {
        match self {
            RevylError::Http(e) => e.is_transient(),
            RevylError::UploadInterrupted { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}
