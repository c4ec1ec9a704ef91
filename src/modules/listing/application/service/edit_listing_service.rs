use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::auth::application::domain::policies::{authorize, Caller, DenyReason};
use crate::listing::application::domain::entities::{Listing, ListingDetails, MediaRecord};
use crate::listing::application::ports::incoming::use_cases::{
    EditListingCommand, EditListingError, EditListingUseCase,
};
use crate::listing::application::ports::outgoing::{
    ListingQuery, ListingStore, ListingStoreError, ListingTx, NewMedia,
};
use crate::multimedia::application::domain::entities::{MediaKind, MediaPayload};
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::ports::outgoing::MediaStore;
use crate::multimedia::application::services::discard_remote_objects;

/// Updates listing fields in place and swaps out replaced media slots.
///
/// A replacement uploads the new file, links it and unlinks the old rows of
/// that kind in one transaction. The old remote objects are removed only after
/// the commit succeeded.
pub struct EditListingService<S, Q>
where
    S: ListingStore,
    Q: ListingQuery,
{
    store: S,
    query: Q,
    media_store: Arc<dyn MediaStore>,
    policy: UploadPolicy,
}

impl<S, Q> EditListingService<S, Q>
where
    S: ListingStore,
    Q: ListingQuery,
{
    pub fn new(store: S, query: Q, media_store: Arc<dyn MediaStore>, policy: UploadPolicy) -> Self {
        Self {
            store,
            query,
            media_store,
            policy,
        }
    }

    fn replacements(
        &self,
        command: &EditListingCommand,
    ) -> Result<Vec<(MediaPayload, MediaKind)>, EditListingError> {
        let mut files = Vec::new();
        for (slot, kind) in [
            (&command.image, MediaKind::Image),
            (&command.video, MediaKind::Video),
        ] {
            if let Some(payload) = slot {
                self.policy
                    .check(payload, kind)
                    .map_err(|e| EditListingError::Validation(e.into()))?;
                files.push((payload.clone(), kind));
            }
        }
        Ok(files)
    }

    async fn abort(
        &self,
        tx: S::Tx,
        uploaded: &[(String, MediaKind)],
        err: EditListingError,
    ) -> EditListingError {
        if let Err(e) = tx.rollback().await {
            error!(error = %e, "Rollback failed after edit error");
        }
        discard_remote_objects(self.media_store.as_ref(), uploaded).await;
        err
    }
}

fn map_store_error(e: ListingStoreError) -> EditListingError {
    match e {
        ListingStoreError::NotFound => EditListingError::NotFound,
        ListingStoreError::DatabaseError(msg) => EditListingError::RepositoryError(msg),
    }
}

#[async_trait]
impl<S, Q> EditListingUseCase for EditListingService<S, Q>
where
    S: ListingStore,
    Q: ListingQuery,
{
    async fn execute(
        &self,
        caller: Caller,
        command: EditListingCommand,
    ) -> Result<Listing, EditListingError> {
        if caller.id().is_none() {
            return Err(EditListingError::AccessDenied(DenyReason::Unauthenticated));
        }

        let listing_id = command.listing_id;
        let existing = self
            .query
            .find_by_id(listing_id)
            .await
            .map_err(|e| EditListingError::RepositoryError(e.to_string()))?
            .ok_or(EditListingError::NotFound)?;

        authorize(&caller, existing.owner)
            .into_result()
            .map_err(|reason| {
                warn!(
                    listing_id = listing_id,
                    caller = ?caller.id(),
                    "Edit denied"
                );
                EditListingError::AccessDenied(reason)
            })?;

        let details = ListingDetails::new(
            &command.title,
            &command.description,
            command.price,
            &command.property_type,
        )?;
        let files = self.replacements(&command)?;
        let now = Utc::now();

        let mut tx = self.store.begin().await.map_err(map_store_error)?;

        if let Err(e) = tx.update_listing(listing_id, &details, now).await {
            error!(listing_id = listing_id, error = %e, "Failed to update listing");
            return Err(self.abort(tx, &[], map_store_error(e)).await);
        }

        let mut uploaded: Vec<(String, MediaKind)> = Vec::new();
        let mut replaced: Vec<(String, MediaKind)> = Vec::new();
        let mut removed_ids: Vec<i32> = Vec::new();
        let mut added: Vec<MediaRecord> = Vec::new();

        for (payload, kind) in &files {
            let stored = match self.media_store.upload(payload, *kind).await {
                Ok(stored) => stored,
                Err(e) => {
                    warn!(listing_id = listing_id, kind = %kind, error = %e, "Replacement upload failed");
                    return Err(self
                        .abort(tx, &uploaded, EditListingError::UploadFailed(e))
                        .await);
                }
            };
            uploaded.push((stored.remote_id.clone(), stored.kind));

            let record = match tx
                .insert_media(NewMedia {
                    listing_id,
                    public_id: stored.remote_id,
                    url: stored.url,
                    file_type: stored.kind,
                    created_at: now,
                })
                .await
            {
                Ok(record) => record,
                Err(e) => {
                    error!(listing_id = listing_id, error = %e, "Failed to insert media row");
                    return Err(self.abort(tx, &uploaded, map_store_error(e)).await);
                }
            };
            added.push(record);

            let old: Vec<&MediaRecord> = existing.media_of_kind(*kind).collect();
            let old_ids: Vec<i32> = old.iter().map(|m| m.id).collect();
            if !old_ids.is_empty() {
                if let Err(e) = tx.delete_media(&old_ids).await {
                    error!(listing_id = listing_id, error = %e, "Failed to unlink replaced media");
                    return Err(self.abort(tx, &uploaded, map_store_error(e)).await);
                }
            }
            replaced.extend(old.iter().map(|m| (m.public_id.clone(), m.file_type)));
            removed_ids.extend(old_ids);
        }

        if let Err(e) = tx.commit().await {
            error!(listing_id = listing_id, error = %e, "Failed to commit listing edit");
            discard_remote_objects(self.media_store.as_ref(), &uploaded).await;
            return Err(map_store_error(e));
        }

        let orphaned = discard_remote_objects(self.media_store.as_ref(), &replaced).await;
        if orphaned > 0 {
            warn!(listing_id = listing_id, orphaned, "Replaced media left on remote store");
        }

        info!(
            listing_id = listing_id,
            replaced = replaced.len(),
            "Listing updated"
        );

        let mut media: Vec<MediaRecord> = existing
            .media
            .into_iter()
            .filter(|m| !removed_ids.contains(&m.id))
            .collect();
        media.extend(added);

        Ok(Listing {
            id: listing_id,
            owner: existing.owner,
            title: details.title().to_string(),
            description: details.description().to_string(),
            price: details.price(),
            property_type: details.property_type(),
            created_at: existing.created_at,
            updated_at: now,
            media,
        })
    }
}
