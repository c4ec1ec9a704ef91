use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::auth::application::domain::policies::{Caller, DenyReason};
use crate::listing::application::domain::entities::{
    Listing, ListingDetails, ListingValidationError, MediaRecord,
};
use crate::listing::application::ports::incoming::use_cases::{
    PublishListingCommand, PublishListingError, PublishListingUseCase,
};
use crate::listing::application::ports::outgoing::{
    ListingStore, ListingStoreError, ListingTx, NewListing, NewMedia,
};
use crate::multimedia::application::domain::entities::{MediaKind, MediaPayload};
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::ports::outgoing::MediaStore;
use crate::multimedia::application::services::discard_remote_objects;

//
// ──────────────────────────────────────────────────────────
// Service
// ──────────────────────────────────────────────────────────
//

/// Validates, then writes the listing row, uploads each file and links it,
/// all inside one transaction.
///
/// Any failure after the transaction opened rolls it back and discards the
/// objects already uploaded, so neither the database nor the media store keeps
/// traces of a failed publication.
pub struct PublishListingService<S>
where
    S: ListingStore,
{
    store: S,
    media_store: Arc<dyn MediaStore>,
    policy: UploadPolicy,
}

impl<S> PublishListingService<S>
where
    S: ListingStore,
{
    pub fn new(store: S, media_store: Arc<dyn MediaStore>, policy: UploadPolicy) -> Self {
        Self {
            store,
            media_store,
            policy,
        }
    }

    fn validate(
        &self,
        command: &PublishListingCommand,
    ) -> Result<(ListingDetails, Vec<(MediaPayload, MediaKind)>), ListingValidationError> {
        let details = ListingDetails::new(
            &command.title,
            &command.description,
            command.price,
            &command.property_type,
        )?;

        let image = command
            .image
            .as_ref()
            .ok_or(ListingValidationError::MissingImage)?;
        self.policy.check(image, MediaKind::Image)?;

        let mut files = vec![(image.clone(), MediaKind::Image)];
        if let Some(video) = &command.video {
            self.policy.check(video, MediaKind::Video)?;
            files.push((video.clone(), MediaKind::Video));
        }

        Ok((details, files))
    }

    /// Rolls back and removes already-uploaded objects.
    async fn abort(
        &self,
        tx: S::Tx,
        uploaded: &[(String, MediaKind)],
        err: PublishListingError,
    ) -> PublishListingError {
        if let Err(e) = tx.rollback().await {
            error!(error = %e, "Rollback failed after publication error");
        }

        let failures = discard_remote_objects(self.media_store.as_ref(), uploaded).await;
        if failures > 0 {
            warn!(
                orphaned = failures,
                "Uploaded media could not be removed after failed publication"
            );
        }

        err
    }
}

fn map_store_error(e: ListingStoreError) -> PublishListingError {
    PublishListingError::RepositoryError(e.to_string())
}

#[async_trait]
impl<S> PublishListingUseCase for PublishListingService<S>
where
    S: ListingStore,
{
    async fn execute(
        &self,
        caller: Caller,
        command: PublishListingCommand,
    ) -> Result<Listing, PublishListingError> {
        let owner = caller
            .id()
            .ok_or(PublishListingError::AccessDenied(DenyReason::Unauthenticated))?;

        let (details, files) = self.validate(&command)?;
        let now = Utc::now();

        let mut tx = self.store.begin().await.map_err(|e| {
            error!(user_id = %owner, error = %e, "Could not open publication transaction");
            map_store_error(e)
        })?;

        let listing_id = match tx
            .insert_listing(NewListing {
                owner,
                details: details.clone(),
                created_at: now,
            })
            .await
        {
            Ok(id) => id,
            Err(e) => {
                error!(user_id = %owner, error = %e, "Failed to insert listing");
                return Err(self.abort(tx, &[], map_store_error(e)).await);
            }
        };

        let mut uploaded: Vec<(String, MediaKind)> = Vec::with_capacity(files.len());
        let mut media: Vec<MediaRecord> = Vec::with_capacity(files.len());

        for (payload, kind) in &files {
            let stored = match self.media_store.upload(payload, *kind).await {
                Ok(stored) => stored,
                Err(e) => {
                    warn!(
                        user_id = %owner,
                        file_name = %payload.file_name,
                        kind = %kind,
                        error = %e,
                        "Media upload failed, aborting publication"
                    );
                    return Err(self
                        .abort(tx, &uploaded, PublishListingError::UploadFailed(e))
                        .await);
                }
            };
            uploaded.push((stored.remote_id.clone(), stored.kind));

            match tx
                .insert_media(NewMedia {
                    listing_id,
                    public_id: stored.remote_id,
                    url: stored.url,
                    file_type: stored.kind,
                    created_at: now,
                })
                .await
            {
                Ok(record) => media.push(record),
                Err(e) => {
                    error!(user_id = %owner, error = %e, "Failed to insert media row");
                    return Err(self.abort(tx, &uploaded, map_store_error(e)).await);
                }
            }
        }

        if let Err(e) = tx.commit().await {
            error!(user_id = %owner, error = %e, "Failed to commit publication");
            let failures = discard_remote_objects(self.media_store.as_ref(), &uploaded).await;
            if failures > 0 {
                warn!(orphaned = failures, "Uploaded media could not be removed");
            }
            return Err(map_store_error(e));
        }

        info!(
            user_id = %owner,
            listing_id = listing_id,
            media = media.len(),
            "Listing published"
        );

        Ok(Listing {
            id: listing_id,
            owner,
            title: details.title().to_string(),
            description: details.description().to_string(),
            price: details.price(),
            property_type: details.property_type(),
            created_at: now,
            updated_at: now,
            media,
        })
    }
}
