use async_trait::async_trait;

use crate::auth::application::domain::policies::{Caller, DenyReason};
use crate::listing::application::domain::entities::{Listing, ListingValidationError};
use crate::multimedia::application::domain::entities::MediaPayload;
use crate::multimedia::application::ports::outgoing::MediaStoreError;

//
// ──────────────────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────────────────
//

/// Raw form values; validation happens inside the use case.
#[derive(Debug, Clone)]
pub struct PublishListingCommand {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub property_type: String,
    pub image: Option<MediaPayload>,
    pub video: Option<MediaPayload>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishListingError {
    #[error("{0}")]
    Validation(#[from] ListingValidationError),

    #[error("Access denied: {}", .0.message())]
    AccessDenied(DenyReason),

    #[error("Media upload failed: {0}")]
    UploadFailed(MediaStoreError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

//
// ──────────────────────────────────────────────────────────
// Use case trait
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait PublishListingUseCase: Send + Sync {
    async fn execute(
        &self,
        caller: Caller,
        command: PublishListingCommand,
    ) -> Result<Listing, PublishListingError>;
}
