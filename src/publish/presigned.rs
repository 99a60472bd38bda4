//! Presigned upload: reserve a slot, PUT the artifact, complete the version.
//!
//! Each step consumes the previous step's output, so the sequence is
//! expressed as types: [`request_slot`] yields a [`SlotReserved`], whose
//! `upload` yields an [`Uploaded`], whose `finalize` yields the record.
//! Nothing is resumable; a failure anywhere means starting over.

use crate::api::{CompleteUploadRequest, RevylApi, UploadSlotResponse, VersionId};
use crate::cli::RuntimeConfig;
use crate::error::{ContractError, Result, RevylError};
use crate::http::HttpClient;
use crate::state::{UploadPhase, UploadState};
use bytes::Bytes;
use serde_json::Value;
use std::path::PathBuf;

/// Content type for Android packages
pub const APK_CONTENT_TYPE: &str = "application/vnd.android.package-archive";
/// Content type for everything else
pub const BINARY_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type announced for an uploaded file name
pub fn content_type_for(file_name: &str) -> &'static str {
    if file_name.ends_with(".apk") {
        APK_CONTENT_TYPE
    } else {
        BINARY_CONTENT_TYPE
    }
}

/// Validated upload-url response
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSlot {
    /// Presigned PUT target
    pub upload_url: String,
    /// Version slot to complete afterwards
    pub version_id: VersionId,
}

impl UploadSlot {
    /// Require both a non-empty `upload_url` and a usable `version_id`
    pub fn from_response(response: UploadSlotResponse) -> std::result::Result<Self, ContractError> {
        let upload_url = match response.upload_url {
            Some(Value::String(url)) if !url.is_empty() => url,
            _ => return Err(ContractError::InvalidUploadSlot),
        };
        let version_id = response
            .version_id
            .as_ref()
            .and_then(VersionId::from_value)
            .ok_or(ContractError::InvalidUploadSlot)?;

        Ok(Self {
            upload_url,
            version_id,
        })
    }
}

/// A reserved slot waiting for its artifact
#[derive(Debug)]
pub struct SlotReserved {
    slot: UploadSlot,
}

/// An artifact stored at the presigned URL, not yet completed
#[derive(Debug)]
pub struct Uploaded {
    version_id: VersionId,
}

/// Ask the service for an upload slot
pub async fn request_slot(
    api: &RevylApi,
    build_var: &str,
    version: &str,
    file_name: &str,
) -> Result<SlotReserved> {
    let response = api.request_upload_slot(build_var, version, file_name).await?;
    let slot = UploadSlot::from_response(response)?;
    Ok(SlotReserved { slot })
}

impl SlotReserved {
    /// The reserved slot
    pub fn slot(&self) -> &UploadSlot {
        &self.slot
    }

    /// PUT the artifact to the presigned URL
    pub async fn upload(self, http: &HttpClient, file: Bytes, content_type: &str) -> Result<Uploaded> {
        http.upload_file(&self.slot.upload_url, file, content_type)
            .await?;
        Ok(Uploaded {
            version_id: self.slot.version_id,
        })
    }
}

impl Uploaded {
    /// Version slot the artifact was stored for
    pub fn version_id(&self) -> &VersionId {
        &self.version_id
    }

    /// Complete the version and return the service's finalized record
    pub async fn finalize(self, api: &RevylApi, metadata: Value) -> Result<Value> {
        let body = CompleteUploadRequest {
            version_id: self.version_id,
            metadata,
        };
        api.complete_upload(&body).await
    }
}

/// Inputs of a presigned publish
#[derive(Debug, Clone)]
pub struct PresignedPublish {
    /// Build variable receiving the version
    pub build_var: String,
    /// Version being published
    pub version: String,
    /// Local artifact
    pub file: PathBuf,
    /// File name announced to the service
    pub file_name: String,
    /// Metadata stored with the version
    pub metadata: Value,
}

/// Result of a completed presigned publish
#[derive(Debug, Clone)]
pub struct PublishedUpload {
    /// Completed version slot
    pub version_id: VersionId,
    /// Finalized record returned by the service
    pub record: Value,
    /// Phase history
    pub state: UploadState,
}

/// Run all three steps in order.
///
/// The file is only read once a slot has been granted. A failure comes back
/// as [`RevylError::UploadInterrupted`] naming the step that was in progress.
pub async fn publish_presigned(
    api: &RevylApi,
    publish: PresignedPublish,
    config: &RuntimeConfig,
) -> Result<PublishedUpload> {
    let mut state = UploadState::new(&publish.version, &publish.file_name);

    match run_steps(api, publish, config, &mut state).await {
        Ok((version_id, record)) => Ok(PublishedUpload {
            version_id,
            record,
            state,
        }),
        Err(e) => {
            let phase = state.current_phase;
            state.fail(e.to_string());
            Err(RevylError::UploadInterrupted {
                phase: phase.label(),
                source: Box::new(e),
            })
        }
    }
}

async fn run_steps(
    api: &RevylApi,
    publish: PresignedPublish,
    config: &RuntimeConfig,
    state: &mut UploadState,
) -> Result<(VersionId, Value)> {
    let reserved =
        request_slot(api, &publish.build_var, &publish.version, &publish.file_name).await?;
    config.success_println("Got upload URL");
    state.advance(
        UploadPhase::SlotReserved,
        Some(serde_json::json!({ "version_id": reserved.slot().version_id })),
    );

    config.progress_println("Uploading file...");
    let bytes = tokio::fs::read(&publish.file).await.map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("failed to read {}: {}", publish.file.display(), e),
        )
    })?;
    let content_type = content_type_for(&publish.file_name);
    log::debug!("Uploading {} bytes as {}", bytes.len(), content_type);

    let uploaded = reserved
        .upload(api.http(), Bytes::from(bytes), content_type)
        .await?;
    config.success_println("File uploaded successfully");
    state.advance(UploadPhase::Uploaded, None);

    config.progress_println("Completing upload...");
    let version_id = uploaded.version_id().clone();
    let record = uploaded.finalize(api, publish.metadata).await?;
    state.advance(UploadPhase::Finalized, None);

    Ok((version_id, record))
}
