use async_trait::async_trait;
use serde::Serialize;

use crate::auth::application::domain::policies::{Caller, DenyReason};

/// Outcome of a listing deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedListing {
    pub listing_id: i32,
    pub media_deleted: u64,
    /// Remote objects the media store could not delete.
    pub remote_failures: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteListingError {
    #[error("Listing not found")]
    NotFound,

    #[error("Access denied: {}", .0.message())]
    AccessDenied(DenyReason),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait DeleteListingUseCase: Send + Sync {
    async fn execute(
        &self,
        caller: Caller,
        listing_id: i32,
    ) -> Result<DeletedListing, DeleteListingError>;
}
