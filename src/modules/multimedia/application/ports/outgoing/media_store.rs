use async_trait::async_trait;

use crate::multimedia::application::domain::entities::{MediaKind, MediaPayload, StoredObject};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaStoreError {
    #[error("Media store did not answer in time")]
    Timeout,

    #[error("Media store rejected the request: {0}")]
    Rejected(String),

    #[error("Media store transport error: {0}")]
    Transport(String),

    #[error("Media store returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Remote object store holding listing images and videos.
///
/// Implementations never panic on upstream failures: `upload` reports them as
/// `MediaStoreError`, `delete` as `false`.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(
        &self,
        payload: &MediaPayload,
        kind: MediaKind,
    ) -> Result<StoredObject, MediaStoreError>;

    /// Removes a remote object. Returns `false` when the object does not exist
    /// or the call failed, so repeated deletes are harmless.
    async fn delete(&self, remote_id: &str, kind: MediaKind) -> bool;
}
