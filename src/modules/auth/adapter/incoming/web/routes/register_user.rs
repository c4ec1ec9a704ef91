use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::routes::UserDto;
use crate::auth::application::use_cases::register_user::{
    RegisterInputError, RegisterUserError, RegisterUserInput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Request body for user registration
#[derive(Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    /// Username, 3 to 50 characters
    #[schema(example = "awa_diop")]
    pub username: String,

    /// Phone number
    #[schema(example = "+221771234567")]
    pub phone: String,

    /// Password, at least 6 characters
    #[schema(example = "secret123")]
    pub password: String,

    /// Must equal `password`
    #[schema(example = "secret123")]
    pub confirm_password: String,
}

fn map_input_error(err: &RegisterInputError) -> HttpResponse {
    let code = match err {
        RegisterInputError::UsernameLength => "INVALID_USERNAME",
        RegisterInputError::InvalidPhone => "INVALID_PHONE",
        RegisterInputError::PasswordTooShort => "PASSWORD_TOO_SHORT",
        RegisterInputError::PasswordMismatch => "PASSWORD_MISMATCH",
    };
    ApiResponse::bad_request(code, &err.to_string())
}

fn map_register_error(err: RegisterUserError, username: &str) -> HttpResponse {
    match err {
        RegisterUserError::UsernameTaken => {
            warn!(username = %username, "Registration rejected: username taken");
            ApiResponse::conflict("USERNAME_TAKEN", "Username is already taken")
        }
        RegisterUserError::HashingFailed(ref e) => {
            error!(username = %username, error = %e, "Password hashing failed");
            ApiResponse::internal_error()
        }
        RegisterUserError::RepositoryError(ref e) => {
            error!(username = %username, error = %e, "Failed to persist user");
            ApiResponse::internal_error()
        }
    }
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User created", body = inline(SuccessResponse<UserDto>)),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "USERNAME_TAKEN", "message": "Username is already taken" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let input = match RegisterUserInput::new(
        dto.username,
        dto.phone,
        dto.password,
        dto.confirm_password,
    ) {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "Invalid registration input");
            return map_input_error(&e);
        }
    };

    let username = input.username().to_string();
    match data.register_user_use_case.execute(input).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "User registered");
            ApiResponse::created(UserDto::from(user))
        }
        Err(e) => map_register_error(e, &username),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{User, UserId};
    use crate::auth::application::use_cases::register_user::IRegisterUserUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::Utc;

    struct MockRegisterSuccess;

    #[async_trait]
    impl IRegisterUserUseCase for MockRegisterSuccess {
        async fn execute(&self, input: RegisterUserInput) -> Result<User, RegisterUserError> {
            Ok(User {
                id: UserId::from(7),
                username: input.username().to_string(),
                phone: input.phone().to_string(),
                is_admin: false,
                created_at: Utc::now(),
            })
        }
    }

    struct MockRegisterFailure(RegisterUserError);

    #[async_trait]
    impl IRegisterUserUseCase for MockRegisterFailure {
        async fn execute(&self, _input: RegisterUserInput) -> Result<User, RegisterUserError> {
            Err(self.0.clone())
        }
    }

    fn body(username: &str, password: &str, confirm: &str) -> serde_json::Value {
        serde_json::json!({
            "username": username,
            "phone": "+221 77 123 45 67",
            "password": password,
            "confirm_password": confirm,
        })
    }

    #[actix_web::test]
    async fn test_register_user_success() {
        let app_state = TestAppStateBuilder::default()
            .with_register_user(MockRegisterSuccess)
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(register_user_handler))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(body("awa_diop", "secret123", "secret123"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], 7);
        assert_eq!(body["data"]["username"], "awa_diop");
        assert_eq!(body["data"]["is_admin"], false);
        assert!(body["data"].get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn test_register_user_password_mismatch() {
        let app_state = TestAppStateBuilder::default()
            .with_register_user(MockRegisterSuccess)
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(register_user_handler))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(body("awa_diop", "secret123", "secret124"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "PASSWORD_MISMATCH");
    }

    #[actix_web::test]
    async fn test_register_user_short_username() {
        let app_state = TestAppStateBuilder::default()
            .with_register_user(MockRegisterSuccess)
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(register_user_handler))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(body("ab", "secret123", "secret123"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_USERNAME");
    }

    #[actix_web::test]
    async fn test_register_user_username_taken() {
        let app_state = TestAppStateBuilder::default()
            .with_register_user(MockRegisterFailure(RegisterUserError::UsernameTaken))
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(register_user_handler))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(body("awa_diop", "secret123", "secret123"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "USERNAME_TAKEN");
    }

    #[actix_web::test]
    async fn test_register_user_repository_error() {
        let app_state = TestAppStateBuilder::default()
            .with_register_user(MockRegisterFailure(RegisterUserError::RepositoryError(
                "connection reset".into(),
            )))
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(register_user_handler))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(body("awa_diop", "secret123", "secret123"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }
}
