use async_trait::async_trait;

use crate::listing::application::domain::entities::Listing;
use crate::listing::application::ports::incoming::use_cases::{
    GetSingleListingError, GetSingleListingUseCase,
};
use crate::listing::application::ports::outgoing::ListingQuery;

pub struct GetSingleListingService<Q>
where
    Q: ListingQuery,
{
    query: Q,
}

impl<Q> GetSingleListingService<Q>
where
    Q: ListingQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetSingleListingUseCase for GetSingleListingService<Q>
where
    Q: ListingQuery,
{
    async fn execute(&self, listing_id: i32) -> Result<Listing, GetSingleListingError> {
        self.query
            .find_by_id(listing_id)
            .await
            .map_err(|e| GetSingleListingError::QueryFailed(e.to_string()))?
            .ok_or(GetSingleListingError::NotFound)
    }
}
