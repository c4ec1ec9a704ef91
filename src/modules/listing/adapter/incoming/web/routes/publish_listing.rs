use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Responder};
use tracing::{error, info, warn};

use super::listing_dto::ListingDto;
use super::listing_errors::{access_denied, form_error, upload_failed, validation_error};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    resolve_caller_or_response, AuthenticatedUser,
};
use crate::auth::application::domain::entities::UserId;
use crate::listing::adapter::incoming::web::multipart_form::{ListingForm, ListingFormSchema};
use crate::listing::application::ports::incoming::use_cases::PublishListingError;
use crate::shared::api::ApiResponse;
use crate::AppState;

fn map_publish_error(err: PublishListingError, user_id: UserId) -> HttpResponse {
    match err {
        PublishListingError::Validation(ref e) => {
            warn!(user_id = %user_id, error = %e, "Listing rejected");
            validation_error(e)
        }
        PublishListingError::AccessDenied(reason) => access_denied(reason),
        PublishListingError::UploadFailed(ref e) => upload_failed(e),
        PublishListingError::RepositoryError(ref e) => {
            error!(user_id = %user_id, error = %e, "Failed to persist listing");
            ApiResponse::internal_error()
        }
    }
}

/// Publish a listing
///
/// Multipart form with the listing fields, one required `image` and an
/// optional `video`. Either everything is stored or nothing is.
#[utoipa::path(
    post,
    path = "/api/listings",
    tag = "listings",
    security(("bearer_auth" = [])),
    request_body(content = ListingFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Listing published", body = inline(SuccessResponse<ListingDto>)),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 502, description = "Media service failed, retry", body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "PUBLICATION_FAILED",
                    "message": "Publication failed while storing media, please retry"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/listings")]
pub async fn publish_listing_handler(
    user: AuthenticatedUser,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let caller = match resolve_caller_or_response(&data, user.user_id).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    let command = match ListingForm::read(payload, data.upload_policy.max_file_size_bytes)
        .await
        .and_then(ListingForm::into_publish_command)
    {
        Ok(command) => command,
        Err(e) => {
            warn!(user_id = %user.user_id, error = %e, "Unreadable listing form");
            return form_error(&e);
        }
    };

    match data.listing.publish.execute(caller, command).await {
        Ok(listing) => {
            info!(
                user_id = %user.user_id,
                listing_id = listing.id,
                media = listing.media.len(),
                "Listing published"
            );
            ApiResponse::created(ListingDto::from(listing))
        }
        Err(e) => map_publish_error(e, user.user_id),
    }
}
