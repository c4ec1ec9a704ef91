mod delete_user_service;
mod get_dashboard_service;
mod list_listings_service;
mod list_users_service;
mod toggle_admin_service;

pub use delete_user_service::DeleteUserService;
pub use get_dashboard_service::GetDashboardService;
pub use list_listings_service::ListAllListingsService;
pub use list_users_service::ListUsersService;
pub use toggle_admin_service::ToggleAdminService;
