use crate::listing::application::ports::incoming::use_cases::{
    EditListingCommand, PublishListingCommand,
};
use crate::multimedia::application::domain::entities::MediaPayload;

pub const LISTING_DESCRIPTION: &str = "Appartement lumineux avec balcon, proche des commerces";

pub fn image_payload() -> MediaPayload {
    MediaPayload::new(
        "salon.jpg",
        Some("image/jpeg".to_string()),
        vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10],
    )
}

pub fn video_payload() -> MediaPayload {
    MediaPayload::new(
        "visite.mp4",
        Some("video/mp4".to_string()),
        vec![0x00, 0x00, 0x00, 0x18, 0x66, 0x74, 0x79, 0x70],
    )
}

/// A valid rental with one image, as the publication form would send it.
pub fn publish_command() -> PublishListingCommand {
    PublishListingCommand {
        title: "Appartement 3 pièces".to_string(),
        description: LISTING_DESCRIPTION.to_string(),
        price: 500_000,
        property_type: "location".to_string(),
        image: Some(image_payload()),
        video: None,
    }
}

/// Field-only update turning the listing into a sale.
pub fn edit_command(listing_id: i32) -> EditListingCommand {
    EditListingCommand {
        listing_id,
        title: "Villa avec piscine".to_string(),
        description: "Grande villa avec piscine, jardin arboré et garage double".to_string(),
        price: 95_000_000,
        property_type: "vente".to_string(),
        image: None,
        video: None,
    }
}
