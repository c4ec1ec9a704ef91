use actix_web::{get, web, Responder};
use tracing::error;

use super::listing_dto::ListingDto;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::listing::application::ports::incoming::use_cases::GetSingleListingError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Get one listing with its media
#[utoipa::path(
    get,
    path = "/api/listings/{listing_id}",
    tag = "listings",
    params(("listing_id" = i32, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing found", body = inline(SuccessResponse<ListingDto>)),
        (status = 404, description = "Listing not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/listings/{listing_id}")]
pub async fn get_single_listing_handler(
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    let listing_id = path.into_inner();

    match data.listing.get_single.execute(listing_id).await {
        Ok(listing) => ApiResponse::success(ListingDto::from(listing)),
        Err(GetSingleListingError::NotFound) => {
            ApiResponse::not_found("LISTING_NOT_FOUND", "Listing not found")
        }
        Err(GetSingleListingError::QueryFailed(e)) => {
            error!(listing_id, error = %e, "Failed to load listing");
            ApiResponse::internal_error()
        }
    }
}
