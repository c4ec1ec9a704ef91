use async_trait::async_trait;

use crate::admin::application::ports::incoming::use_cases::{
    AdminQueryError, ListAllListingsUseCase, ADMIN_PAGE_SIZE,
};
use crate::auth::application::domain::policies::{authorize_admin, Caller};
use crate::listing::application::domain::entities::Listing;
use crate::listing::application::ports::outgoing::{ListingFilter, ListingQuery};
use crate::shared::pagination::{Page, PageRequest};

/// Every listing regardless of owner or type.
pub struct ListAllListingsService<L>
where
    L: ListingQuery,
{
    listings: L,
}

impl<L> ListAllListingsService<L>
where
    L: ListingQuery,
{
    pub fn new(listings: L) -> Self {
        Self { listings }
    }
}

#[async_trait]
impl<L> ListAllListingsUseCase for ListAllListingsService<L>
where
    L: ListingQuery,
{
    async fn execute(&self, caller: Caller, page: u64) -> Result<Page<Listing>, AdminQueryError> {
        authorize_admin(&caller)
            .into_result()
            .map_err(AdminQueryError::AccessDenied)?;

        self.listings
            .list(ListingFilter::default(), PageRequest::new(page, ADMIN_PAGE_SIZE))
            .await
            .map_err(|e| AdminQueryError::QueryFailed(e.to_string()))
    }
}
