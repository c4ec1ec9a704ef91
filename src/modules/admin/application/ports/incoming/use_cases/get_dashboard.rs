use async_trait::async_trait;

use super::AdminQueryError;
use crate::auth::application::domain::entities::User;
use crate::auth::application::domain::policies::Caller;
use crate::listing::application::domain::entities::Listing;

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub total_users: u64,
    pub total_listings: u64,
    pub total_admins: u64,
    pub recent_listings: Vec<Listing>,
    pub recent_users: Vec<User>,
}

#[async_trait]
pub trait GetDashboardUseCase: Send + Sync {
    async fn execute(&self, caller: Caller) -> Result<Dashboard, AdminQueryError>;
}
