//! Status codes shared by the mutating listing routes.

use actix_web::HttpResponse;

use crate::auth::application::domain::policies::DenyReason;
use crate::listing::adapter::incoming::web::multipart_form::ListingFormError;
use crate::listing::application::domain::entities::ListingValidationError;
use crate::multimedia::application::domain::policies::UploadRejection;
use crate::multimedia::application::ports::outgoing::MediaStoreError;
use crate::shared::api::ApiResponse;

pub(super) fn form_error(err: &ListingFormError) -> HttpResponse {
    match err {
        ListingFormError::FileTooLarge { .. } => {
            ApiResponse::payload_too_large("FILE_TOO_LARGE", &err.to_string())
        }
        ListingFormError::InvalidPrice => ApiResponse::bad_request("INVALID_PRICE", &err.to_string()),
        ListingFormError::FieldTooLong(_) | ListingFormError::Malformed(_) => {
            ApiResponse::bad_request("INVALID_FORM", &err.to_string())
        }
    }
}

pub(super) fn validation_error(err: &ListingValidationError) -> HttpResponse {
    let code = match err {
        ListingValidationError::TitleLength => "INVALID_TITLE",
        ListingValidationError::DescriptionTooShort => "INVALID_DESCRIPTION",
        ListingValidationError::NonPositivePrice => "INVALID_PRICE",
        ListingValidationError::UnknownPropertyType(_) => "INVALID_PROPERTY_TYPE",
        ListingValidationError::MissingImage => "IMAGE_REQUIRED",
        ListingValidationError::InvalidMedia(UploadRejection::FileTooLarge { .. }) => {
            return ApiResponse::payload_too_large("FILE_TOO_LARGE", &err.to_string());
        }
        ListingValidationError::InvalidMedia(_) => "INVALID_MEDIA",
    };
    ApiResponse::bad_request(code, &err.to_string())
}

pub(super) fn access_denied(reason: DenyReason) -> HttpResponse {
    match reason {
        DenyReason::Unauthenticated => {
            ApiResponse::unauthorized("UNAUTHENTICATED", reason.message())
        }
        _ => ApiResponse::forbidden("FORBIDDEN", reason.message()),
    }
}

/// Upstream media failures are retryable by the client.
pub(super) fn upload_failed(err: &MediaStoreError) -> HttpResponse {
    tracing::warn!(error = %err, "Media upload failed, publication rolled back");
    ApiResponse::bad_gateway(
        "PUBLICATION_FAILED",
        "Publication failed while storing media, please retry",
    )
}
