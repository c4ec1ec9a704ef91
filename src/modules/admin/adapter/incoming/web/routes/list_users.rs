use actix_web::{get, web, Responder};
use tracing::error;

use super::admin_denied;
use super::admin_dto::{AdminPageQuery, UserPageDto};
use crate::admin::application::ports::incoming::use_cases::AdminQueryError;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    resolve_caller_or_response, AuthenticatedUser,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List user accounts, newest first
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(AdminPageQuery),
    responses(
        (status = 200, description = "Page of users", body = inline(SuccessResponse<UserPageDto>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/admin/users")]
pub async fn list_users_handler(
    user: AuthenticatedUser,
    query: web::Query<AdminPageQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let caller = match resolve_caller_or_response(&data, user.user_id).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match data.admin.list_users.execute(caller, query.page()).await {
        Ok(page) => ApiResponse::success(UserPageDto::from(page)),
        Err(AdminQueryError::AccessDenied(reason)) => admin_denied(reason),
        Err(AdminQueryError::QueryFailed(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to list users");
            ApiResponse::internal_error()
        }
    }
}
