mod delete_listing_service;
mod edit_listing_service;
mod get_listings_service;
mod get_single_listing_service;
mod publish_listing_service;

pub use delete_listing_service::DeleteListingService;
pub use edit_listing_service::EditListingService;
pub use get_listings_service::GetListingsService;
pub use get_single_listing_service::GetSingleListingService;
pub use publish_listing_service::PublishListingService;
