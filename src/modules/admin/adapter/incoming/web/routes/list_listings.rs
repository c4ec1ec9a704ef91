use actix_web::{get, web, Responder};
use tracing::error;

use super::admin_denied;
use super::admin_dto::AdminPageQuery;
use crate::admin::application::ports::incoming::use_cases::AdminQueryError;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    resolve_caller_or_response, AuthenticatedUser,
};
use crate::listing::adapter::incoming::web::routes::ListingPageDto;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List every listing, newest first
#[utoipa::path(
    get,
    path = "/api/admin/listings",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(AdminPageQuery),
    responses(
        (status = 200, description = "Page of listings", body = inline(SuccessResponse<ListingPageDto>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/admin/listings")]
pub async fn list_all_listings_handler(
    user: AuthenticatedUser,
    query: web::Query<AdminPageQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let caller = match resolve_caller_or_response(&data, user.user_id).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match data.admin.list_listings.execute(caller, query.page()).await {
        Ok(page) => ApiResponse::success(ListingPageDto::from(page)),
        Err(AdminQueryError::AccessDenied(reason)) => admin_denied(reason),
        Err(AdminQueryError::QueryFailed(e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to list listings");
            ApiResponse::internal_error()
        }
    }
}
