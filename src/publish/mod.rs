//! Publishing build versions to the service.
//!
//! Two routes exist: the service downloads the artifact itself
//! ([`publish_from_url`]), or the artifact is pushed through a presigned
//! storage URL ([`publish_presigned`]).

mod from_url;
mod presigned;

pub use from_url::{FromUrlPublish, publish_from_url};
pub use presigned::{
    APK_CONTENT_TYPE, BINARY_CONTENT_TYPE, PresignedPublish, PublishedUpload, SlotReserved,
    Uploaded, UploadSlot, content_type_for, publish_presigned, request_slot,
};
