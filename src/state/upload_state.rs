//! Presigned upload state tracking.

use serde::Serialize;

/// Phase of a presigned upload.
///
/// Phases only move forward; a failure ends the sequence and the whole
/// upload must be started again from `RequestSlot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum UploadPhase {
    /// Waiting for the service to reserve a version slot
    RequestSlot,
    /// Slot reserved, artifact not yet stored
    SlotReserved,
    /// Artifact stored at the presigned URL
    Uploaded,
    /// Version completed on the service
    Finalized,
    /// Upload abandoned
    Failed,
}

impl UploadPhase {
    /// Human-readable phase name
    pub fn label(self) -> &'static str {
        match self {
            UploadPhase::RequestSlot => "request upload slot",
            UploadPhase::SlotReserved => "upload file",
            UploadPhase::Uploaded => "complete upload",
            UploadPhase::Finalized => "finalized",
            UploadPhase::Failed => "failed",
        }
    }
}

/// Phase transition record
#[derive(Debug, Clone, Serialize)]
pub struct UploadCheckpoint {
    /// Phase entered
    pub phase: UploadPhase,
    /// Timestamp when the phase was entered
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Any data associated with this checkpoint
    pub data: Option<serde_json::Value>,
}

/// Where and why an upload stopped
#[derive(Debug, Clone, Serialize)]
pub struct UploadFailure {
    /// Phase that was in progress
    pub phase: UploadPhase,
    /// Error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Complete state of one presigned upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadState {
    /// Version being published
    pub version: String,
    /// File name announced to the service
    pub file_name: String,
    /// Timestamp when the upload started
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// Current phase
    pub current_phase: UploadPhase,
    /// Phases entered so far
    pub checkpoints: Vec<UploadCheckpoint>,
    /// Failure, if the upload stopped early
    pub failure: Option<UploadFailure>,
}

impl UploadState {
    /// Start tracking a new upload
    pub fn new(version: &str, file_name: &str) -> Self {
        let now = chrono::Utc::now();
        Self {
            version: version.to_string(),
            file_name: file_name.to_string(),
            started_at: now,
            current_phase: UploadPhase::RequestSlot,
            checkpoints: vec![UploadCheckpoint {
                phase: UploadPhase::RequestSlot,
                timestamp: now,
                data: None,
            }],
            failure: None,
        }
    }

    /// Move to a later phase and record a checkpoint
    pub fn advance(&mut self, phase: UploadPhase, data: Option<serde_json::Value>) {
        debug_assert!(
            phase > self.current_phase && self.current_phase != UploadPhase::Failed,
            "upload phase cannot move from {:?} to {:?}",
            self.current_phase,
            phase
        );
        log::debug!("Upload {} entered {:?}", self.version, phase);
        self.current_phase = phase;
        self.checkpoints.push(UploadCheckpoint {
            phase,
            timestamp: chrono::Utc::now(),
            data,
        });
    }

    /// Record a failure of the phase in progress
    pub fn fail(&mut self, message: String) {
        log::debug!(
            "Upload {} failed during '{}': {}",
            self.version,
            self.current_phase.label(),
            message
        );
        self.failure = Some(UploadFailure {
            phase: self.current_phase,
            message,
            timestamp: chrono::Utc::now(),
        });
        self.current_phase = UploadPhase::Failed;
    }

    /// Check if a specific phase has been reached
    pub fn has_reached(&self, phase: UploadPhase) -> bool {
        self.checkpoints.iter().any(|cp| cp.phase == phase)
    }

    /// Whether the upload finished successfully
    pub fn is_finalized(&self) -> bool {
        self.current_phase == UploadPhase::Finalized
    }
}
