pub mod media;
pub mod property_listings;
