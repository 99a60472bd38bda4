//! Verify that a pinned version resolves to a downloadable artifact.

use crate::api::{ResolveRequest, ResolveResponse, RevylApi, display_value};
use crate::error::{ContractError, Result};
use serde_json::Value;

/// A resolution that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved version, equal to the requested one
    pub version: String,
    /// Where the artifact can be downloaded
    pub download_url: String,
}

/// Check a resolve response against the requested version.
///
/// In order: `version` must be present, must equal `requested` exactly,
/// and `download_url` must be present.
pub fn verify_resolution(
    requested: &str,
    response: &ResolveResponse,
) -> std::result::Result<Resolution, ContractError> {
    let version = response
        .version
        .as_ref()
        .and_then(display_value)
        .ok_or(ContractError::MissingVersion)?;

    // A non-string version never matches, even if it prints the same.
    if response.version.as_ref().and_then(Value::as_str) != Some(requested) {
        return Err(ContractError::VersionMismatch {
            expected: requested.to_string(),
            actual: version,
        });
    }

    let download_url = response
        .download_url
        .as_ref()
        .and_then(display_value)
        .ok_or(ContractError::MissingDownloadUrl)?;

    Ok(Resolution {
        version,
        download_url,
    })
}

/// Resolve `version` in `build_var` and verify the answer
pub async fn verify_resolve(api: &RevylApi, build_var: &str, version: &str) -> Result<Resolution> {
    let body = ResolveRequest {
        build_var_id: build_var.to_string(),
        pinned_version: version.to_string(),
    };
    let response = api.resolve(&body).await?;
    Ok(verify_resolution(version, &response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> ResolveResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn matching_version_with_download_url_passes() {
        let resolution = verify_resolution(
            "1.0.0",
            &response(json!({"version": "1.0.0", "download_url": "https://x"})),
        )
        .unwrap();
        assert_eq!(resolution.version, "1.0.0");
        assert_eq!(resolution.download_url, "https://x");
    }

    #[test]
    fn different_version_is_a_mismatch() {
        let err = verify_resolution(
            "1.0.0",
            &response(json!({"version": "1.0.1", "download_url": "https://x"})),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Version mismatch: expected 1.0.0, got 1.0.1");
    }

    #[test]
    fn numeric_version_does_not_match_string() {
        let err = verify_resolution(
            "1",
            &response(json!({"version": 1, "download_url": "https://x"})),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::VersionMismatch { .. }));
    }

    #[test]
    fn missing_or_empty_version_is_reported_first() {
        for body in [json!({}), json!({"version": "", "download_url": "https://x"})] {
            assert!(matches!(
                verify_resolution("1.0.0", &response(body)),
                Err(ContractError::MissingVersion)
            ));
        }
    }

    #[test]
    fn missing_download_url_is_reported() {
        let err = verify_resolution("1.0.0", &response(json!({"version": "1.0.0"}))).unwrap_err();
        assert!(matches!(err, ContractError::MissingDownloadUrl));
    }
}
