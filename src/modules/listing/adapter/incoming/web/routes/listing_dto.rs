use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::listing::application::domain::entities::{Listing, MediaRecord};
use crate::shared::pagination::Page;

#[derive(Debug, Serialize, ToSchema)]
pub struct MediaDto {
    #[schema(example = 31)]
    pub id: i32,

    #[schema(example = "listings/images/salon_ab12cd")]
    pub public_id: String,

    #[schema(example = "https://res.cloudinary.com/demo/image/upload/v1/listings/images/salon_ab12cd.jpg")]
    pub url: String,

    /// `image` or `video`
    #[schema(example = "image")]
    pub file_type: String,

    pub created_at: DateTime<Utc>,
}

impl From<MediaRecord> for MediaDto {
    fn from(media: MediaRecord) -> Self {
        Self {
            id: media.id,
            public_id: media.public_id,
            url: media.url,
            file_type: media.file_type.as_str().to_string(),
            created_at: media.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListingDto {
    #[schema(example = 12)]
    pub id: i32,

    #[schema(example = 7)]
    pub user_id: i32,

    #[schema(example = "Appartement 3 pièces")]
    pub title: String,

    pub description: String,

    #[schema(example = 500000)]
    pub price: i64,

    /// `sale`, `rental` or `purchase`
    #[schema(example = "rental")]
    pub property_type: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub media: Vec<MediaDto>,
}

impl From<Listing> for ListingDto {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            user_id: listing.owner.value(),
            title: listing.title,
            description: listing.description,
            price: listing.price,
            property_type: listing.property_type.as_str().to_string(),
            created_at: listing.created_at,
            updated_at: listing.updated_at,
            media: listing.media.into_iter().map(MediaDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListingPageDto {
    pub items: Vec<ListingDto>,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 10)]
    pub per_page: u64,
    #[schema(example = 42)]
    pub total: u64,
    #[schema(example = 5)]
    pub total_pages: u64,
}

impl From<Page<Listing>> for ListingPageDto {
    fn from(page: Page<Listing>) -> Self {
        let total_pages = page.total_pages();
        Self {
            items: page.items.into_iter().map(ListingDto::from).collect(),
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            total_pages,
        }
    }
}
