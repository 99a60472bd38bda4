//! Request and response bodies exchanged with the build service.
//!
//! Responses are decoded loosely and validated by the workflow that reads
//! them; only the fields a workflow depends on are modeled.

use crate::cli::HeaderMap;
use crate::git::GitContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Body of `POST /vars/{id}/versions/from-url`
#[derive(Debug, Clone, Serialize)]
pub struct FromUrlRequest {
    /// Where the service should download the artifact from
    pub from_url: String,
    /// Version being published
    pub version: String,
    /// Free-form metadata stored with the version
    pub metadata: Value,
    /// Headers the service sends when downloading `from_url`
    pub headers: HeaderMap,
}

/// Identifier of a version slot, as issued by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionId {
    /// String identifier
    Text(String),
    /// Numeric identifier
    Number(serde_json::Number),
}

impl VersionId {
    /// Accept a non-empty string or a number
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(VersionId::Text(s.clone())),
            Value::Number(n) => Some(VersionId::Number(n.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionId::Text(s) => f.write_str(s),
            VersionId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Raw response of the upload-url endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadSlotResponse {
    /// Presigned PUT target
    #[serde(default)]
    pub upload_url: Option<Value>,
    /// Version slot reserved for the upload
    #[serde(default)]
    pub version_id: Option<Value>,
}

/// Body of `POST /versions/{id}/complete-upload`
#[derive(Debug, Clone, Serialize)]
pub struct CompleteUploadRequest {
    /// Slot being finalized
    pub version_id: VersionId,
    /// Free-form metadata stored with the version
    pub metadata: Value,
}

/// Body of `POST /resolve`
#[derive(Debug, Clone, Serialize)]
pub struct ResolveRequest {
    /// Build variable to resolve in
    pub build_var_id: String,
    /// Version requested
    pub pinned_version: String,
}

/// Raw response of the resolve endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolveResponse {
    /// Version the service resolved to
    #[serde(default)]
    pub version: Option<Value>,
    /// Download URL of the resolved artifact
    #[serde(default)]
    pub download_url: Option<Value>,
}

/// Which tests a run executes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TestSelection {
    /// A named suite
    Suite {
        /// Suite name
        name: String,
    },
}

/// A build pinned to a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestTarget {
    /// Build variable id
    pub build_var_id: String,
    /// Version to test
    pub pinned_version: String,
}

/// Body of `POST /v1/test-runs`
#[derive(Debug, Clone, Serialize)]
pub struct TestRunRequest {
    /// Tests to run
    pub selection: TestSelection,
    /// Builds to run them against
    pub targets: Vec<TestTarget>,
    /// Originating commit
    pub context: GitContext,
}

/// Response of the test-runs endpoint
#[derive(Debug, Clone)]
pub struct TestRunResponse {
    /// Run identifier, when the service returned one
    pub run_id: Option<String>,
    /// Link to the run, when the service returned one
    pub url: Option<String>,
    /// Full response for display
    pub raw: Value,
}

impl TestRunResponse {
    /// Pick the optional display fields out of the raw response
    pub fn from_value(raw: Value) -> Self {
        let run_id = raw.get("run_id").and_then(display_value);
        let url = raw.get("url").and_then(display_value);
        Self { run_id, url, raw }
    }
}

/// Whether a JSON value counts as present: not null, false, 0 or "".
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a present value for display; strings print without quotes.
pub fn display_value(value: &Value) -> Option<String> {
    if !is_present(value) {
        return None;
    }
    Some(match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
