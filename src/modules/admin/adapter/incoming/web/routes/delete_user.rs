use actix_web::{delete, web, Responder};
use tracing::error;

use super::admin_denied;
use super::admin_dto::DeletedUserDto;
use crate::admin::application::ports::incoming::use_cases::DeleteUserError;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    resolve_caller_or_response, AuthenticatedUser,
};
use crate::auth::application::domain::entities::UserId;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Delete a user with all their listings and media
///
/// Own account and administrator accounts are refused.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "Target user id")),
    responses(
        (status = 200, description = "User deleted", body = inline(SuccessResponse<DeletedUserDto>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not allowed", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/admin/users/{user_id}")]
pub async fn delete_user_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    let target = UserId::from(path.into_inner());
    let caller = match resolve_caller_or_response(&data, user.user_id).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match data.admin.delete_user.execute(caller, target).await {
        Ok(deleted) => ApiResponse::success(DeletedUserDto::from(deleted)),
        Err(DeleteUserError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(DeleteUserError::AccessDenied(reason)) => admin_denied(reason),
        Err(DeleteUserError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, target = %target, error = %e, "Failed to delete user");
            ApiResponse::internal_error()
        }
    }
}
