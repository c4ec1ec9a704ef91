use async_trait::async_trait;

use super::AdminQueryError;
use crate::auth::application::domain::policies::Caller;
use crate::listing::application::domain::entities::Listing;
use crate::shared::pagination::Page;

#[async_trait]
pub trait ListAllListingsUseCase: Send + Sync {
    async fn execute(&self, caller: Caller, page: u64) -> Result<Page<Listing>, AdminQueryError>;
}
