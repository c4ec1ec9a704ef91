use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::auth::application::domain::entities::UserId;
use crate::multimedia::application::domain::entities::MediaKind;
use crate::multimedia::application::domain::policies::UploadRejection;

pub const TITLE_MIN_LEN: usize = 5;
pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MIN_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Sale,
    Rental,
    Purchase,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Sale => "sale",
            PropertyType::Rental => "rental",
            PropertyType::Purchase => "purchase",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = ListingValidationError;

    /// Accepts the stored names and the French form labels, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sale" | "vente" => Ok(PropertyType::Sale),
            "rental" | "location" => Ok(PropertyType::Rental),
            "purchase" | "achat" => Ok(PropertyType::Purchase),
            _ => Err(ListingValidationError::UnknownPropertyType(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    #[error("Title must be between 5 and 200 characters")]
    TitleLength,

    #[error("Description must be at least 20 characters")]
    DescriptionTooShort,

    #[error("Price must be greater than zero")]
    NonPositivePrice,

    #[error("Unknown property type: {0}")]
    UnknownPropertyType(String),

    #[error("At least one image is required")]
    MissingImage,

    #[error("Invalid media file: {0}")]
    InvalidMedia(#[from] UploadRejection),
}

/// Field values of a listing, validated and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingDetails {
    title: String,
    description: String,
    price: i64,
    property_type: PropertyType,
}

impl ListingDetails {
    pub fn new(
        title: &str,
        description: &str,
        price: i64,
        property_type: &str,
    ) -> Result<Self, ListingValidationError> {
        let title = title.trim();
        let title_len = title.chars().count();
        if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&title_len) {
            return Err(ListingValidationError::TitleLength);
        }

        let description = description.trim();
        if description.chars().count() < DESCRIPTION_MIN_LEN {
            return Err(ListingValidationError::DescriptionTooShort);
        }

        if price <= 0 {
            return Err(ListingValidationError::NonPositivePrice);
        }

        let property_type = property_type.parse::<PropertyType>()?;

        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            price,
            property_type,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }
}

/// A persisted media row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRecord {
    pub id: i32,
    pub listing_id: i32,
    pub public_id: String,
    pub url: String,
    pub file_type: MediaKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub id: i32,
    pub owner: UserId,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub property_type: PropertyType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub media: Vec<MediaRecord>,
}

impl Listing {
    pub fn media_of_kind(&self, kind: MediaKind) -> impl Iterator<Item = &MediaRecord> {
        self.media.iter().filter(move |m| m.file_type == kind)
    }

    /// `(public_id, kind)` pairs of every attached media object.
    pub fn remote_objects(&self) -> Vec<(String, MediaKind)> {
        self.media
            .iter()
            .map(|m| (m.public_id.clone(), m.file_type))
            .collect()
    }
}
