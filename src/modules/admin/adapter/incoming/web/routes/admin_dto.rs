use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::admin::application::ports::incoming::use_cases::{Dashboard, DeletedUser};
use crate::auth::adapter::incoming::web::routes::UserDto;
use crate::auth::application::domain::entities::User;
use crate::listing::adapter::incoming::web::routes::ListingDto;
use crate::shared::pagination::Page;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminPageQuery {
    /// 1-based, 20 rows per page
    #[param(example = 1, minimum = 1)]
    pub page: Option<u64>,
}

impl AdminPageQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardDto {
    #[schema(example = 42)]
    pub total_users: u64,
    #[schema(example = 130)]
    pub total_listings: u64,
    #[schema(example = 2)]
    pub total_admins: u64,
    pub recent_listings: Vec<ListingDto>,
    pub recent_users: Vec<UserDto>,
}

impl From<Dashboard> for DashboardDto {
    fn from(d: Dashboard) -> Self {
        Self {
            total_users: d.total_users,
            total_listings: d.total_listings,
            total_admins: d.total_admins,
            recent_listings: d.recent_listings.into_iter().map(ListingDto::from).collect(),
            recent_users: d.recent_users.into_iter().map(UserDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserPageDto {
    pub items: Vec<UserDto>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl From<Page<User>> for UserPageDto {
    fn from(page: Page<User>) -> Self {
        Self {
            total_pages: page.total_pages(),
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            items: page.items.into_iter().map(UserDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedUserDto {
    #[schema(example = 9)]
    pub user_id: i32,
    /// Remote media files the deletion attempted to remove
    #[schema(example = 3)]
    pub media_objects: usize,
    #[schema(example = 0)]
    pub remote_failures: usize,
}

impl From<DeletedUser> for DeletedUserDto {
    fn from(d: DeletedUser) -> Self {
        Self {
            user_id: d.user_id.value(),
            media_objects: d.media_objects,
            remote_failures: d.remote_failures,
        }
    }
}
