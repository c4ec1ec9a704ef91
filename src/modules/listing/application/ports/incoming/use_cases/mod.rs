mod delete_listing;
mod edit_listing;
mod get_listings;
mod get_single_listing;
mod publish_listing;

pub use delete_listing::{DeleteListingError, DeleteListingUseCase, DeletedListing};
pub use edit_listing::{EditListingCommand, EditListingError, EditListingUseCase};
pub use get_listings::{GetListingsError, GetListingsUseCase};
pub use get_single_listing::{GetSingleListingError, GetSingleListingUseCase};
pub use publish_listing::{PublishListingCommand, PublishListingError, PublishListingUseCase};
