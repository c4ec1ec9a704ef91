use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use sea_orm::sea_query::JoinType;
use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::listing::application::domain::entities::{Listing, MediaRecord, PropertyType};
use crate::listing::application::ports::outgoing::{
    ListingFilter, ListingQuery, ListingQueryError,
};
use crate::multimedia::application::domain::entities::MediaKind;
use crate::shared::pagination::{Page, PageRequest};

use super::sea_orm_entity::{media, property_listings};

// ============================================================================
// Query Implementation
// ============================================================================

#[derive(Clone, Debug)]
pub struct ListingQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ListingQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn media_of(&self, listing_ids: Vec<i32>) -> Result<Vec<media::Model>, ListingQueryError> {
        if listing_ids.is_empty() {
            return Ok(Vec::new());
        }

        media::Entity::find()
            .filter(media::Column::ListingId.is_in(listing_ids))
            .order_by_asc(media::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)
    }
}

fn map_db_err(e: DbErr) -> ListingQueryError {
    ListingQueryError::DatabaseError(e.to_string())
}

#[async_trait]
impl ListingQuery for ListingQueryPostgres {
    async fn find_by_id(&self, listing_id: i32) -> Result<Option<Listing>, ListingQueryError> {
        let Some(model) = property_listings::Entity::find_by_id(listing_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let media = self.media_of(vec![model.id]).await?;

        listing_from_model(model, media)
            .map(Some)
            .map_err(ListingQueryError::DatabaseError)
    }

    async fn list(
        &self,
        filter: ListingFilter,
        page: PageRequest,
    ) -> Result<Page<Listing>, ListingQueryError> {
        let mut query = property_listings::Entity::find();

        if let Some(property_type) = filter.property_type {
            query = query.filter(property_listings::Column::PropertyType.eq(property_type.as_str()));
        }
        if let Some(owner) = filter.owner {
            query = query.filter(property_listings::Column::UserId.eq(owner.value()));
        }

        let query = query
            .order_by_desc(property_listings::Column::CreatedAt)
            .order_by_desc(property_listings::Column::Id);

        let total = query.clone().count(&*self.db).await.map_err(map_db_err)?;

        let models = query
            .offset(page.offset())
            .limit(page.per_page)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let ids = models.iter().map(|m| m.id).collect();
        let mut media_by_listing: HashMap<i32, Vec<media::Model>> = HashMap::new();
        for row in self.media_of(ids).await? {
            media_by_listing.entry(row.listing_id).or_default().push(row);
        }

        let items = models
            .into_iter()
            .map(|model| {
                let media = media_by_listing.remove(&model.id).unwrap_or_default();
                listing_from_model(model, media)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(ListingQueryError::DatabaseError)?;

        Ok(Page {
            items,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn count_listings(&self) -> Result<u64, ListingQueryError> {
        property_listings::Entity::find()
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn media_for_owner(&self, owner: UserId) -> Result<Vec<MediaRecord>, ListingQueryError> {
        let rows = media::Entity::find()
            .join(JoinType::InnerJoin, media::Relation::PropertyListings.def())
            .filter(property_listings::Column::UserId.eq(owner.value()))
            .order_by_asc(media::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .map(media_from_model)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ListingQueryError::DatabaseError)
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// Stored strings that no longer parse surface as a database error message.
pub(crate) fn media_from_model(model: media::Model) -> Result<MediaRecord, String> {
    let file_type = model
        .file_type
        .parse::<MediaKind>()
        .map_err(|e| e.to_string())?;

    Ok(MediaRecord {
        id: model.id,
        listing_id: model.listing_id,
        public_id: model.public_id,
        url: model.url,
        file_type,
        created_at: model.created_at.into(),
    })
}

pub(crate) fn listing_from_model(
    model: property_listings::Model,
    media: Vec<media::Model>,
) -> Result<Listing, String> {
    let property_type = model
        .property_type
        .parse::<PropertyType>()
        .map_err(|e| e.to_string())?;

    let media = media
        .into_iter()
        .map(media_from_model)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Listing {
        id: model.id,
        owner: UserId::from(model.user_id),
        title: model.title,
        description: model.description,
        price: model.price,
        property_type,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
        media,
    })
}
