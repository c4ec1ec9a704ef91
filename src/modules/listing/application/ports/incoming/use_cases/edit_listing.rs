use async_trait::async_trait;

use crate::auth::application::domain::policies::{Caller, DenyReason};
use crate::listing::application::domain::entities::{Listing, ListingValidationError};
use crate::multimedia::application::domain::entities::MediaPayload;
use crate::multimedia::application::ports::outgoing::MediaStoreError;

/// Full-form update. `image` and `video` replace the current file of that kind
/// when present and leave it untouched when absent.
#[derive(Debug, Clone)]
pub struct EditListingCommand {
    pub listing_id: i32,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub property_type: String,
    pub image: Option<MediaPayload>,
    pub video: Option<MediaPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditListingError {
    #[error("Listing not found")]
    NotFound,

    #[error("{0}")]
    Validation(#[from] ListingValidationError),

    #[error("Access denied: {}", .0.message())]
    AccessDenied(DenyReason),

    #[error("Media upload failed: {0}")]
    UploadFailed(MediaStoreError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait EditListingUseCase: Send + Sync {
    async fn execute(
        &self,
        caller: Caller,
        command: EditListingCommand,
    ) -> Result<Listing, EditListingError>;
}
