//! Git metadata for test-run traceability.

mod context;

pub use context::{GitContext, UNKNOWN_REPO, UNKNOWN_SHA};
