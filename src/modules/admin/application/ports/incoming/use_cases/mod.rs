mod delete_user;
mod get_dashboard;
mod list_listings;
mod list_users;
mod toggle_admin;

pub use delete_user::{DeleteUserError, DeleteUserUseCase, DeletedUser};
pub use get_dashboard::{Dashboard, GetDashboardUseCase};
pub use list_listings::ListAllListingsUseCase;
pub use list_users::ListUsersUseCase;
pub use toggle_admin::{ToggleAdminError, ToggleAdminUseCase};

use crate::auth::application::domain::policies::DenyReason;

/// Number of rows per page on the admin lists.
pub const ADMIN_PAGE_SIZE: u64 = 20;

/// Number of recent users and listings on the dashboard.
pub const DASHBOARD_RECENT: u64 = 5;

/// Failure of the read-only admin views.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminQueryError {
    #[error("Access denied: {}", .0.message())]
    AccessDenied(DenyReason),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}
