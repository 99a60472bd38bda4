//! Repository metadata supplied by the CI environment.

use serde::{Deserialize, Serialize};

/// Repository used when `GITHUB_REPOSITORY` is unset
pub const UNKNOWN_REPO: &str = "unknown/unknown";
/// Commit used when `GITHUB_SHA` is unset
pub const UNKNOWN_SHA: &str = "unknown";

/// Git context attached to a test run for traceability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitContext {
    /// `owner/name`
    pub repo: String,
    /// Commit under test
    pub commit_sha: String,
    /// Pull request number, when triggered from a PR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<i64>,
    /// Branch or tag name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl GitContext {
    /// Read the context from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the context through `lookup`; never fails
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            repo: non_empty("GITHUB_REPOSITORY").unwrap_or_else(|| UNKNOWN_REPO.to_string()),
            commit_sha: non_empty("GITHUB_SHA").unwrap_or_else(|| UNKNOWN_SHA.to_string()),
            pr_number: non_empty("GITHUB_EVENT_NUMBER").and_then(|v| leading_integer(&v)),
            branch: non_empty("GITHUB_REF_NAME"),
        }
    }
}

/// Integer prefix of `raw` after leading whitespace, e.g. `"42/merge"` -> 42.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len() - sign_len);
    trimmed[..sign_len + digits].parse().ok()
}
