use async_trait::async_trait;

use crate::admin::application::ports::incoming::use_cases::{
    AdminQueryError, Dashboard, GetDashboardUseCase, DASHBOARD_RECENT,
};
use crate::auth::application::domain::policies::{authorize_admin, Caller};
use crate::auth::application::ports::outgoing::UserQuery;
use crate::listing::application::ports::outgoing::{ListingFilter, ListingQuery};
use crate::shared::pagination::PageRequest;

pub struct GetDashboardService<U, L>
where
    U: UserQuery,
    L: ListingQuery,
{
    users: U,
    listings: L,
}

impl<U, L> GetDashboardService<U, L>
where
    U: UserQuery,
    L: ListingQuery,
{
    pub fn new(users: U, listings: L) -> Self {
        Self { users, listings }
    }
}

fn query_failed(e: impl ToString) -> AdminQueryError {
    AdminQueryError::QueryFailed(e.to_string())
}

#[async_trait]
impl<U, L> GetDashboardUseCase for GetDashboardService<U, L>
where
    U: UserQuery,
    L: ListingQuery,
{
    async fn execute(&self, caller: Caller) -> Result<Dashboard, AdminQueryError> {
        authorize_admin(&caller)
            .into_result()
            .map_err(AdminQueryError::AccessDenied)?;

        let recent = PageRequest::first(DASHBOARD_RECENT);

        let total_users = self.users.count_users().await.map_err(query_failed)?;
        let total_admins = self.users.count_admins().await.map_err(query_failed)?;
        let total_listings = self.listings.count_listings().await.map_err(query_failed)?;
        let recent_users = self.users.list_users(recent).await.map_err(query_failed)?;
        let recent_listings = self
            .listings
            .list(ListingFilter::default(), recent)
            .await
            .map_err(query_failed)?;

        Ok(Dashboard {
            total_users,
            total_listings,
            total_admins,
            recent_listings: recent_listings.items,
            recent_users: recent_users.items,
        })
    }
}
