mod delete_listing;
mod edit_listing;
mod get_listings;
mod get_single_listing;
mod listing_dto;
mod listing_errors;
mod publish_listing;

pub use delete_listing::{delete_listing_handler, DeletedListingDto, __path_delete_listing_handler};
pub use edit_listing::{edit_listing_handler, __path_edit_listing_handler};
pub use get_listings::{get_listings_handler, ListingsQuery, __path_get_listings_handler};
pub use get_single_listing::{get_single_listing_handler, __path_get_single_listing_handler};
pub use listing_dto::{ListingDto, ListingPageDto, MediaDto};
pub use publish_listing::{publish_listing_handler, __path_publish_listing_handler};
