use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;

use crate::listing::application::domain::entities::{ListingDetails, MediaRecord};
use crate::listing::application::ports::outgoing::{
    ListingStore, ListingStoreError, ListingTx, NewListing, NewMedia,
};

use super::listing_query_postgres::media_from_model;
use super::sea_orm_entity::{media, property_listings};

#[derive(Clone, Debug)]
pub struct ListingStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl ListingStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> ListingStoreError {
    ListingStoreError::DatabaseError(e.to_string())
}

#[async_trait]
impl ListingStore for ListingStorePostgres {
    type Tx = PostgresListingTx;

    async fn begin(&self) -> Result<Self::Tx, ListingStoreError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(PostgresListingTx { txn })
    }
}

/// Wraps a SeaORM transaction. Dropping it without `commit` rolls back.
pub struct PostgresListingTx {
    txn: DatabaseTransaction,
}

#[async_trait]
impl ListingTx for PostgresListingTx {
    async fn insert_listing(&mut self, listing: NewListing) -> Result<i32, ListingStoreError> {
        let created_at = listing.created_at.fixed_offset();
        let row = property_listings::ActiveModel {
            id: NotSet,
            title: Set(listing.details.title().to_string()),
            description: Set(listing.details.description().to_string()),
            price: Set(listing.details.price()),
            property_type: Set(listing.details.property_type().as_str().to_string()),
            created_at: Set(created_at),
            updated_at: Set(created_at),
            user_id: Set(listing.owner.value()),
        };

        let inserted = row.insert(&self.txn).await.map_err(map_db_err)?;
        Ok(inserted.id)
    }

    async fn insert_media(&mut self, new_media: NewMedia) -> Result<MediaRecord, ListingStoreError> {
        let row = media::ActiveModel {
            id: NotSet,
            public_id: Set(new_media.public_id),
            url: Set(new_media.url),
            file_type: Set(new_media.file_type.as_str().to_string()),
            listing_id: Set(new_media.listing_id),
            created_at: Set(new_media.created_at.fixed_offset()),
        };

        let inserted = row.insert(&self.txn).await.map_err(map_db_err)?;
        media_from_model(inserted).map_err(ListingStoreError::DatabaseError)
    }

    async fn update_listing(
        &mut self,
        listing_id: i32,
        details: &ListingDetails,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ListingStoreError> {
        let result = property_listings::Entity::update_many()
            .col_expr(property_listings::Column::Title, Expr::value(details.title()))
            .col_expr(
                property_listings::Column::Description,
                Expr::value(details.description()),
            )
            .col_expr(property_listings::Column::Price, Expr::value(details.price()))
            .col_expr(
                property_listings::Column::PropertyType,
                Expr::value(details.property_type().as_str()),
            )
            .col_expr(
                property_listings::Column::UpdatedAt,
                Expr::value(updated_at.fixed_offset()),
            )
            .filter(property_listings::Column::Id.eq(listing_id))
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(ListingStoreError::NotFound);
        }

        Ok(())
    }

    async fn delete_media(&mut self, media_ids: &[i32]) -> Result<u64, ListingStoreError> {
        if media_ids.is_empty() {
            return Ok(0);
        }

        let result = media::Entity::delete_many()
            .filter(media::Column::Id.is_in(media_ids.to_vec()))
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }

    async fn delete_listing(&mut self, listing_id: i32) -> Result<u64, ListingStoreError> {
        let removed_media = media::Entity::delete_many()
            .filter(media::Column::ListingId.eq(listing_id))
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        let removed = property_listings::Entity::delete_by_id(listing_id)
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        if removed.rows_affected == 0 {
            return Err(ListingStoreError::NotFound);
        }

        Ok(removed_media.rows_affected)
    }

    async fn commit(self) -> Result<(), ListingStoreError> {
        self.txn.commit().await.map_err(map_db_err)
    }

    async fn rollback(self) -> Result<(), ListingStoreError> {
        self.txn.rollback().await.map_err(map_db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::multimedia::application::domain::entities::MediaKind;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn details() -> ListingDetails {
        ListingDetails::new(
            "Appartement 3 pièces",
            "Appartement lumineux avec balcon et parking",
            500_000,
            "location",
        )
        .unwrap()
    }

    fn listing_model(id: i32) -> property_listings::Model {
        let now = Utc::now().fixed_offset();
        property_listings::Model {
            id,
            title: "Appartement 3 pièces".to_string(),
            description: "Appartement lumineux avec balcon et parking".to_string(),
            price: 500_000,
            property_type: "rental".to_string(),
            created_at: now,
            updated_at: now,
            user_id: 7,
        }
    }

    fn media_model(id: i32, listing_id: i32) -> media::Model {
        media::Model {
            id,
            public_id: "listings/images/salon_1".to_string(),
            url: "https://res.cloudinary.com/demo/image/upload/salon_1.jpg".to_string(),
            file_type: "image".to_string(),
            listing_id,
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn exec(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    #[tokio::test]
    async fn test_publish_rows_commit_together() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![listing_model(12)]])
            .append_query_results(vec![vec![media_model(30, 12)]])
            .into_connection();
        let store = ListingStorePostgres::new(Arc::new(db));

        let mut tx = store.begin().await.unwrap();
        let listing_id = tx
            .insert_listing(NewListing {
                owner: UserId::from(7),
                details: details(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        let record = tx
            .insert_media(NewMedia {
                listing_id,
                public_id: "listings/images/salon_1".to_string(),
                url: "https://res.cloudinary.com/demo/image/upload/salon_1.jpg".to_string(),
                file_type: MediaKind::Image,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(listing_id, 12);
        assert_eq!(record.listing_id, 12);
        assert_eq!(record.file_type, MediaKind::Image);
    }

    #[tokio::test]
    async fn test_insert_media_error_is_mapped() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("foreign key violation".to_string())])
            .into_connection();
        let store = ListingStorePostgres::new(Arc::new(db));

        let mut tx = store.begin().await.unwrap();
        let err = tx
            .insert_media(NewMedia {
                listing_id: 99,
                public_id: "x".to_string(),
                url: "https://example.com/x.jpg".to_string(),
                file_type: MediaKind::Image,
                created_at: Utc::now(),
            })
            .await
            .unwrap_err();
        tx.rollback().await.unwrap();

        assert!(matches!(err, ListingStoreError::DatabaseError(msg) if msg.contains("foreign key")));
    }

    #[tokio::test]
    async fn test_update_listing_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0)])
            .into_connection();
        let store = ListingStorePostgres::new(Arc::new(db));

        let mut tx = store.begin().await.unwrap();
        let err = tx
            .update_listing(404, &details(), Utc::now())
            .await
            .unwrap_err();

        assert_eq!(err, ListingStoreError::NotFound);
    }

    #[tokio::test]
    async fn test_delete_listing_removes_media_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(2), exec(1)])
            .into_connection();
        let store = ListingStorePostgres::new(Arc::new(db));

        let mut tx = store.begin().await.unwrap();
        let removed_media = tx.delete_listing(12).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(removed_media, 2);
    }

    #[tokio::test]
    async fn test_delete_listing_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0), exec(0)])
            .into_connection();
        let store = ListingStorePostgres::new(Arc::new(db));

        let mut tx = store.begin().await.unwrap();
        let err = tx.delete_listing(12).await.unwrap_err();

        assert_eq!(err, ListingStoreError::NotFound);
    }

    #[tokio::test]
    async fn test_delete_media_with_no_ids_skips_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let store = ListingStorePostgres::new(Arc::new(db));

        let mut tx = store.begin().await.unwrap();

        assert_eq!(tx.delete_media(&[]).await.unwrap(), 0);
    }
}
