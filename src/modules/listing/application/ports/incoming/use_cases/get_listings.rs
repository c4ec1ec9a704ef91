use async_trait::async_trait;

use crate::listing::application::domain::entities::Listing;
use crate::listing::application::ports::outgoing::ListingFilter;
use crate::shared::pagination::{Page, PageRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GetListingsError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetListingsUseCase: Send + Sync {
    async fn execute(
        &self,
        filter: ListingFilter,
        page: PageRequest,
    ) -> Result<Page<Listing>, GetListingsError>;
}
