use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::auth::application::domain::policies::{authorize, Caller, DenyReason};
use crate::listing::application::ports::incoming::use_cases::{
    DeleteListingError, DeleteListingUseCase, DeletedListing,
};
use crate::listing::application::ports::outgoing::{
    ListingQuery, ListingStore, ListingStoreError, ListingTx,
};
use crate::multimedia::application::ports::outgoing::MediaStore;
use crate::multimedia::application::services::discard_remote_objects;

/// Removes a listing: remote objects first (best effort), then the media rows
/// and the listing row in one transaction.
pub struct DeleteListingService<S, Q>
where
    S: ListingStore,
    Q: ListingQuery,
{
    store: S,
    query: Q,
    media_store: Arc<dyn MediaStore>,
}

impl<S, Q> DeleteListingService<S, Q>
where
    S: ListingStore,
    Q: ListingQuery,
{
    pub fn new(store: S, query: Q, media_store: Arc<dyn MediaStore>) -> Self {
        Self {
            store,
            query,
            media_store,
        }
    }
}

fn map_store_error(e: ListingStoreError) -> DeleteListingError {
    match e {
        ListingStoreError::NotFound => DeleteListingError::NotFound,
        ListingStoreError::DatabaseError(msg) => DeleteListingError::RepositoryError(msg),
    }
}

#[async_trait]
impl<S, Q> DeleteListingUseCase for DeleteListingService<S, Q>
where
    S: ListingStore,
    Q: ListingQuery,
{
    async fn execute(
        &self,
        caller: Caller,
        listing_id: i32,
    ) -> Result<DeletedListing, DeleteListingError> {
        if caller.id().is_none() {
            return Err(DeleteListingError::AccessDenied(
                DenyReason::Unauthenticated,
            ));
        }

        let existing = self
            .query
            .find_by_id(listing_id)
            .await
            .map_err(|e| DeleteListingError::RepositoryError(e.to_string()))?
            .ok_or(DeleteListingError::NotFound)?;

        if let Err(reason) = authorize(&caller, existing.owner).into_result() {
            warn!(listing_id = listing_id, caller = ?caller.id(), "Delete denied");
            return Err(DeleteListingError::AccessDenied(reason));
        }

        let remote_failures =
            discard_remote_objects(self.media_store.as_ref(), &existing.remote_objects()).await;

        let mut tx = self.store.begin().await.map_err(map_store_error)?;

        let media_deleted = match tx.delete_listing(listing_id).await {
            Ok(count) => count,
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    error!(listing_id = listing_id, error = %rb, "Rollback failed");
                }
                error!(listing_id = listing_id, caller = ?caller.id(), error = %e, "Failed to delete listing");
                return Err(map_store_error(e));
            }
        };

        tx.commit().await.map_err(|e| {
            error!(listing_id = listing_id, caller = ?caller.id(), error = %e, "Failed to commit listing delete");
            map_store_error(e)
        })?;

        info!(
            listing_id = listing_id,
            media_deleted = media_deleted,
            remote_failures = remote_failures,
            "Listing deleted"
        );

        Ok(DeletedListing {
            listing_id,
            media_deleted,
            remote_failures,
        })
    }
}
