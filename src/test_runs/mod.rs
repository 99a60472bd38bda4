//! Trigger test runs against pinned build versions.

use crate::api::{RevylApi, TestRunRequest, TestRunResponse, TestSelection, TestTarget};
use crate::error::Result;
use crate::git::GitContext;

/// Suite run when none is named
pub const DEFAULT_SUITE: &str = "smoke";

/// Inputs of a test-run trigger
#[derive(Debug, Clone)]
pub struct TestRunTrigger {
    /// Build variable under test
    pub build_var: String,
    /// Version under test
    pub version: String,
    /// Suite to run
    pub suite: String,
    /// Originating commit
    pub context: GitContext,
}

impl TestRunTrigger {
    /// Request body for the test-runs endpoint
    pub fn to_request(&self) -> TestRunRequest {
        TestRunRequest {
            selection: TestSelection::Suite {
                name: self.suite.clone(),
            },
            targets: vec![TestTarget {
                build_var_id: self.build_var.clone(),
                pinned_version: self.version.clone(),
            }],
            context: self.context.clone(),
        }
    }
}

/// Start the run and return the service's response
pub async fn trigger_test_run(api: &RevylApi, trigger: &TestRunTrigger) -> Result<TestRunResponse> {
    log::debug!(
        "Triggering suite '{}' for {} @ {}",
        trigger.suite,
        trigger.build_var,
        trigger.version
    );
    api.trigger_test_run(&trigger.to_request()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_targets_single_pinned_build() {
        let trigger = TestRunTrigger {
            build_var: "bv-1".to_string(),
            version: "2.1.0".to_string(),
            suite: DEFAULT_SUITE.to_string(),
            context: GitContext::from_lookup(|_| None),
        };
        let request = trigger.to_request();
        assert_eq!(
            request.selection,
            TestSelection::Suite {
                name: "smoke".to_string()
            }
        );
        assert_eq!(request.targets.len(), 1);
        assert_eq!(request.targets[0].pinned_version, "2.1.0");
        assert_eq!(request.context.repo, "unknown/unknown");
    }
}
