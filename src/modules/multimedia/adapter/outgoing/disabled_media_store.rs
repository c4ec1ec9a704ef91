use async_trait::async_trait;
use tracing::warn;

use crate::multimedia::application::domain::entities::{MediaKind, MediaPayload, StoredObject};
use crate::multimedia::application::ports::outgoing::{MediaStore, MediaStoreError};

/// Stand-in used when no media credentials are configured outside production.
/// Every upload is refused, so publishing fails cleanly instead of hanging.
#[derive(Debug, Clone, Default)]
pub struct DisabledMediaStore;

#[async_trait]
impl MediaStore for DisabledMediaStore {
    async fn upload(
        &self,
        payload: &MediaPayload,
        _kind: MediaKind,
    ) -> Result<StoredObject, MediaStoreError> {
        warn!(file_name = %payload.file_name, "Upload refused: media store not configured");
        Err(MediaStoreError::Rejected(
            "media store not configured".to_string(),
        ))
    }

    async fn delete(&self, _remote_id: &str, _kind: MediaKind) -> bool {
        false
    }
}
