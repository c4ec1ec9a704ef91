mod admin_dto;
mod delete_user;
mod get_dashboard;
mod list_listings;
mod list_users;
mod toggle_admin;

pub use admin_dto::{AdminPageQuery, DashboardDto, DeletedUserDto, UserPageDto};
pub use delete_user::{delete_user_handler, __path_delete_user_handler};
pub use get_dashboard::{get_dashboard_handler, __path_get_dashboard_handler};
pub use list_listings::{list_all_listings_handler, __path_list_all_listings_handler};
pub use list_users::{list_users_handler, __path_list_users_handler};
pub use toggle_admin::{toggle_admin_handler, __path_toggle_admin_handler};

use actix_web::HttpResponse;

use crate::auth::application::domain::policies::DenyReason;
use crate::shared::api::ApiResponse;

fn admin_denied(reason: DenyReason) -> HttpResponse {
    match reason {
        DenyReason::Unauthenticated => {
            ApiResponse::unauthorized("UNAUTHENTICATED", reason.message())
        }
        _ => ApiResponse::forbidden("FORBIDDEN", reason.message()),
    }
}
