pub mod listing_query;
pub mod listing_store;

pub use listing_query::{ListingFilter, ListingQuery, ListingQueryError};
pub use listing_store::{ListingStore, ListingStoreError, ListingTx, NewListing, NewMedia};
