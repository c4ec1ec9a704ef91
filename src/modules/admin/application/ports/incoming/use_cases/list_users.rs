use async_trait::async_trait;

use super::AdminQueryError;
use crate::auth::application::domain::entities::User;
use crate::auth::application::domain::policies::Caller;
use crate::shared::pagination::Page;

#[async_trait]
pub trait ListUsersUseCase: Send + Sync {
    /// `page` is 1-based; the page size is fixed.
    async fn execute(&self, caller: Caller, page: u64) -> Result<Page<User>, AdminQueryError>;
}
