use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

// Auth
use crate::auth::adapter::incoming::web::routes::{
    LoginRequestDto, LoginResponse, RegisterUserRequest, UserDto,
};
// Listings
use crate::listing::adapter::incoming::web::multipart_form::ListingFormSchema;
use crate::listing::adapter::incoming::web::routes::{
    DeletedListingDto, ListingDto, ListingPageDto, MediaDto,
};
// Admin
use crate::admin::adapter::incoming::web::routes::{DashboardDto, DeletedUserDto, UserPageDto};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Immo Classifieds API",
        version = "1.0.0",
        description = "Real-estate listings: publication with photos and videos, browsing and administration",
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::logout_user_handler,

        // Listing endpoints
        crate::listing::adapter::incoming::web::routes::get_listings_handler,
        crate::listing::adapter::incoming::web::routes::get_single_listing_handler,
        crate::listing::adapter::incoming::web::routes::publish_listing_handler,
        crate::listing::adapter::incoming::web::routes::edit_listing_handler,
        crate::listing::adapter::incoming::web::routes::delete_listing_handler,

        // Admin endpoints
        crate::admin::adapter::incoming::web::routes::get_dashboard_handler,
        crate::admin::adapter::incoming::web::routes::list_users_handler,
        crate::admin::adapter::incoming::web::routes::list_all_listings_handler,
        crate::admin::adapter::incoming::web::routes::toggle_admin_handler,
        crate::admin::adapter::incoming::web::routes::delete_user_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<UserDto>,
            ErrorResponse,
            ErrorDetail,

            // Auth DTOs
            RegisterUserRequest,
            LoginRequestDto,
            LoginResponse,
            UserDto,

            // Listing DTOs
            ListingFormSchema,
            ListingDto,
            ListingPageDto,
            MediaDto,
            DeletedListingDto,

            // Admin DTOs
            DashboardDto,
            UserPageDto,
            DeletedUserDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "listings", description = "Property listings and their media"),
        (name = "admin", description = "Administration, admin accounts only"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token returned by /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
