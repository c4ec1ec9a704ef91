use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::domain::policies::Caller;
use crate::auth::application::helpers::ResolveCallerError;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// A request carrying a valid access token.
///
/// Only the token subject is known here; admin status is looked up with
/// [`resolve_caller_or_response`].
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let jwt_service = match req.app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
        {
            Some(service) => service,
            None => {
                tracing::error!("Token provider is not registered as app data");
                return ready(Err(create_api_error(ApiResponse::internal_error())));
            }
        };

        let token = match extract_token_from_header(req) {
            Some(t) => t,
            None => {
                return ready(Err(create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))));
            }
        };

        match jwt_service.verify_token(&token) {
            Ok(claims) => ready(Ok(AuthenticatedUser {
                user_id: claims.user_id(),
            })),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected access token");
                ready(Err(create_api_error(ApiResponse::unauthorized(
                    "INVALID_TOKEN",
                    "Invalid or expired token",
                ))))
            }
        }
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Loads the caller's current role. A token whose user no longer exists is
/// answered with 401.
pub async fn resolve_caller_or_response(
    data: &web::Data<AppState>,
    user_id: UserId,
) -> Result<Caller, HttpResponse> {
    match data.caller_resolver.resolve(user_id).await {
        Ok(Caller::Anonymous) => {
            tracing::warn!(user_id = %user_id, "Token subject no longer exists");
            Err(ApiResponse::unauthorized(
                "INVALID_TOKEN",
                "Invalid or expired token",
            ))
        }
        Ok(caller) => Ok(caller),
        Err(ResolveCallerError::RepositoryError(msg)) => {
            tracing::error!(user_id = %user_id, error = %msg, "Failed to resolve caller");
            Err(ApiResponse::internal_error())
        }
    }
}
