use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::UserId;
use crate::listing::application::domain::entities::{ListingDetails, MediaRecord};
use crate::multimedia::application::domain::entities::MediaKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingStoreError {
    #[error("Listing not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone)]
pub struct NewListing {
    pub owner: UserId,
    pub details: ListingDetails,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMedia {
    pub listing_id: i32,
    pub public_id: String,
    pub url: String,
    pub file_type: MediaKind,
    pub created_at: DateTime<Utc>,
}

/// Opens write transactions over listings and their media.
#[async_trait]
pub trait ListingStore: Send + Sync {
    type Tx: ListingTx;

    async fn begin(&self) -> Result<Self::Tx, ListingStoreError>;
}

/// A unit of work. Nothing written through it is visible to readers until
/// `commit`; dropping or rolling back discards every staged row.
#[async_trait]
pub trait ListingTx: Send {
    /// Inserts the listing row and returns its generated id.
    async fn insert_listing(&mut self, listing: NewListing) -> Result<i32, ListingStoreError>;

    async fn insert_media(&mut self, media: NewMedia) -> Result<MediaRecord, ListingStoreError>;

    async fn update_listing(
        &mut self,
        listing_id: i32,
        details: &ListingDetails,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ListingStoreError>;

    /// Deletes the given media rows. Returns how many existed.
    async fn delete_media(&mut self, media_ids: &[i32]) -> Result<u64, ListingStoreError>;

    /// Deletes every media row of the listing, then the listing itself.
    /// Returns the number of media rows removed.
    async fn delete_listing(&mut self, listing_id: i32) -> Result<u64, ListingStoreError>;

    async fn commit(self) -> Result<(), ListingStoreError>;

    async fn rollback(self) -> Result<(), ListingStoreError>;
}
