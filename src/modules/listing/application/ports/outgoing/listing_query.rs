use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::listing::application::domain::entities::{Listing, MediaRecord, PropertyType};
use crate::shared::pagination::{Page, PageRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub property_type: Option<PropertyType>,
    pub owner: Option<UserId>,
}

/// Read side for listings. Results are ordered newest first and carry their media.
#[async_trait]
pub trait ListingQuery: Send + Sync {
    async fn find_by_id(&self, listing_id: i32) -> Result<Option<Listing>, ListingQueryError>;

    async fn list(
        &self,
        filter: ListingFilter,
        page: PageRequest,
    ) -> Result<Page<Listing>, ListingQueryError>;

    async fn count_listings(&self) -> Result<u64, ListingQueryError>;

    /// Media rows of every listing owned by `owner`.
    async fn media_for_owner(&self, owner: UserId) -> Result<Vec<MediaRecord>, ListingQueryError>;
}
