use std::sync::Arc;

use crate::admin::application::ports::incoming::use_cases::{
    DeleteUserUseCase, GetDashboardUseCase, ListAllListingsUseCase, ListUsersUseCase,
    ToggleAdminUseCase,
};
use crate::admin::application::service::{
    DeleteUserService, GetDashboardService, ListAllListingsService, ListUsersService,
    ToggleAdminService,
};
use crate::auth::application::ports::outgoing::{UserQuery, UserRepository};
use crate::listing::application::ports::outgoing::ListingQuery;
use crate::multimedia::application::ports::outgoing::MediaStore;

#[derive(Clone)]
pub struct AdminUseCases {
    pub dashboard: Arc<dyn GetDashboardUseCase + Send + Sync>,
    pub list_users: Arc<dyn ListUsersUseCase + Send + Sync>,
    pub list_listings: Arc<dyn ListAllListingsUseCase + Send + Sync>,
    pub toggle_admin: Arc<dyn ToggleAdminUseCase + Send + Sync>,
    pub delete_user: Arc<dyn DeleteUserUseCase + Send + Sync>,
}

impl AdminUseCases {
    pub fn wire<Q, R, L>(
        users: Q,
        user_repository: R,
        listings: L,
        media_store: Arc<dyn MediaStore>,
    ) -> Self
    where
        Q: UserQuery + Clone + 'static,
        R: UserRepository + Clone + 'static,
        L: ListingQuery + Clone + 'static,
    {
        Self {
            dashboard: Arc::new(GetDashboardService::new(users.clone(), listings.clone())),
            list_users: Arc::new(ListUsersService::new(users.clone())),
            list_listings: Arc::new(ListAllListingsService::new(listings.clone())),
            toggle_admin: Arc::new(ToggleAdminService::new(
                users.clone(),
                user_repository.clone(),
            )),
            delete_user: Arc::new(DeleteUserService::new(
                users,
                user_repository,
                listings,
                media_store,
            )),
        }
    }
}
