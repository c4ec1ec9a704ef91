use async_trait::async_trait;

use crate::admin::application::ports::incoming::use_cases::{
    AdminQueryError, ListUsersUseCase, ADMIN_PAGE_SIZE,
};
use crate::auth::application::domain::entities::User;
use crate::auth::application::domain::policies::{authorize_admin, Caller};
use crate::auth::application::ports::outgoing::UserQuery;
use crate::shared::pagination::{Page, PageRequest};

pub struct ListUsersService<U>
where
    U: UserQuery,
{
    users: U,
}

impl<U> ListUsersService<U>
where
    U: UserQuery,
{
    pub fn new(users: U) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> ListUsersUseCase for ListUsersService<U>
where
    U: UserQuery,
{
    async fn execute(&self, caller: Caller, page: u64) -> Result<Page<User>, AdminQueryError> {
        authorize_admin(&caller)
            .into_result()
            .map_err(AdminQueryError::AccessDenied)?;

        self.users
            .list_users(PageRequest::new(page, ADMIN_PAGE_SIZE))
            .await
            .map_err(|e| AdminQueryError::QueryFailed(e.to_string()))
    }
}
