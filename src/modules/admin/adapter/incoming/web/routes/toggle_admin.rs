use actix_web::{post, web, Responder};
use tracing::error;

use super::admin_denied;
use crate::admin::application::ports::incoming::use_cases::ToggleAdminError;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    resolve_caller_or_response, AuthenticatedUser,
};
use crate::auth::adapter::incoming::web::routes::UserDto;
use crate::auth::application::domain::entities::UserId;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Grant or revoke administrator rights
///
/// Admins cannot change their own flag.
#[utoipa::path(
    post,
    path = "/api/admin/users/{user_id}/toggle-admin",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "Target user id")),
    responses(
        (status = 200, description = "Updated user", body = inline(SuccessResponse<UserDto>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an administrator, or own account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/admin/users/{user_id}/toggle-admin")]
pub async fn toggle_admin_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    let target = UserId::from(path.into_inner());
    let caller = match resolve_caller_or_response(&data, user.user_id).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match data.admin.toggle_admin.execute(caller, target).await {
        Ok(updated) => ApiResponse::success(UserDto::from(updated)),
        Err(ToggleAdminError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(ToggleAdminError::AccessDenied(reason)) => admin_denied(reason),
        Err(ToggleAdminError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, target = %target, error = %e, "Failed to toggle admin");
            ApiResponse::internal_error()
        }
    }
}
