use serde::Serialize;
use utoipa::ToSchema;

/// Envelope of every 2xx JSON body.
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

/// Envelope of every error body. Codes are stable, messages are for humans.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "LISTING_NOT_FOUND")]
    pub code: String,

    #[schema(example = "Listing not found")]
    pub message: String,
}
