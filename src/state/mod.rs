//! Progress tracking for multi-step publish workflows.

mod upload_state;

pub use upload_state::{UploadCheckpoint, UploadFailure, UploadPhase, UploadState};
