use actix_web::{get, web, Responder};
use tracing::error;

use super::admin_denied;
use super::admin_dto::DashboardDto;
use crate::admin::application::ports::incoming::use_cases::AdminQueryError;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    resolve_caller_or_response, AuthenticatedUser,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Admin dashboard
///
/// Totals plus the five most recent listings and users.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard", body = inline(SuccessResponse<DashboardDto>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/admin/dashboard")]
pub async fn get_dashboard_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    let caller = match resolve_caller_or_response(&data, user.user_id).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match data.admin.dashboard.execute(caller).await {
        Ok(dashboard) => ApiResponse::success(DashboardDto::from(dashboard)),
        Err(AdminQueryError::AccessDenied(reason)) => admin_denied(reason),
        Err(AdminQueryError::QueryFailed(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to build dashboard");
            ApiResponse::internal_error()
        }
    }
}
