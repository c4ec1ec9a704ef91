use async_trait::async_trait;

use crate::listing::application::domain::entities::Listing;
use crate::listing::application::ports::incoming::use_cases::{
    GetListingsError, GetListingsUseCase,
};
use crate::listing::application::ports::outgoing::{ListingFilter, ListingQuery};
use crate::shared::pagination::{Page, PageRequest};

pub struct GetListingsService<Q>
where
    Q: ListingQuery,
{
    query: Q,
}

impl<Q> GetListingsService<Q>
where
    Q: ListingQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetListingsUseCase for GetListingsService<Q>
where
    Q: ListingQuery,
{
    async fn execute(
        &self,
        filter: ListingFilter,
        page: PageRequest,
    ) -> Result<Page<Listing>, GetListingsError> {
        self.query
            .list(filter, page)
            .await
            .map_err(|e| GetListingsError::QueryFailed(e.to_string()))
    }
}
