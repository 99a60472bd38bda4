//! Retry configuration for network operations.
//!
//! Both limits default to zero: a failed request ends the command unless the
//! CI job opts in through the environment.

/// Hard ceiling for any retry count read from the environment
pub const MAX_RETRIES: u32 = 10;

/// Configuration for retry behavior across request kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryConfig {
    /// Max retries for JSON API calls that are safe to repeat
    pub api_calls: u32,

    /// Max retries for presigned file uploads
    pub file_uploads: u32,
}

impl RetryConfig {
    /// Parse retry count with clamping to maximum
    ///
    /// # Arguments
    /// * `value` - Raw variable value, if set
    /// * `default` - Default value if variable is not set or invalid
    ///
    /// # Returns
    /// Retry count clamped to [0, MAX_RETRIES]
    fn parse_retry(value: Option<String>, default: u32) -> u32 {
        value
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map(|v| v.min(MAX_RETRIES))
            .unwrap_or(default)
    }

    /// Create config from an environment lookup with fallback to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_calls: Self::parse_retry(lookup("REVYL_RETRY_API"), 0),
            file_uploads: Self::parse_retry(lookup("REVYL_RETRY_UPLOADS"), 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_to_no_retries() {
        let config = RetryConfig::from_lookup(|_| None);
        assert_eq!(config, RetryConfig::default());
    }

    #[test]
    fn clamps_and_ignores_garbage() {
        let env = HashMap::from([
            ("REVYL_RETRY_API", "99"),
            ("REVYL_RETRY_UPLOADS", "lots"),
        ]);
        let config = RetryConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_calls, MAX_RETRIES);
        assert_eq!(config.file_uploads, 0);
    }
}
