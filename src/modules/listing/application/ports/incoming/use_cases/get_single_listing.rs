use async_trait::async_trait;

use crate::listing::application::domain::entities::Listing;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GetSingleListingError {
    #[error("Listing not found")]
    NotFound,

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetSingleListingUseCase: Send + Sync {
    async fn execute(&self, listing_id: i32) -> Result<Listing, GetSingleListingError>;
}
