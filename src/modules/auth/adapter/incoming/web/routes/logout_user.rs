use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use actix_web::{post, Responder};
use tracing::info;

/// Ends the caller's session.
///
/// Access tokens are stateless, so the server only acknowledges; the client
/// discards its token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Missing or invalid token", body = crate::api::schemas::ErrorResponse),
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_user_handler(user: AuthenticatedUser) -> impl Responder {
    info!(user_id = %user.user_id, "User logged out");
    ApiResponse::no_content()
}
