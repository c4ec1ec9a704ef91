use actix_multipart::Multipart;
use actix_web::{put, web, HttpResponse, Responder};
use tracing::{error, info, warn};

use super::listing_dto::ListingDto;
use super::listing_errors::{access_denied, form_error, upload_failed, validation_error};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    resolve_caller_or_response, AuthenticatedUser,
};
use crate::listing::adapter::incoming::web::multipart_form::{ListingForm, ListingFormSchema};
use crate::listing::application::ports::incoming::use_cases::EditListingError;
use crate::shared::api::ApiResponse;
use crate::AppState;

fn map_edit_error(err: EditListingError, listing_id: i32) -> HttpResponse {
    match err {
        EditListingError::NotFound => {
            ApiResponse::not_found("LISTING_NOT_FOUND", "Listing not found")
        }
        EditListingError::Validation(ref e) => validation_error(e),
        EditListingError::AccessDenied(reason) => {
            warn!(listing_id, reason = ?reason, "Listing edit denied");
            access_denied(reason)
        }
        EditListingError::UploadFailed(ref e) => upload_failed(e),
        EditListingError::RepositoryError(ref e) => {
            error!(listing_id, error = %e, "Failed to update listing");
            ApiResponse::internal_error()
        }
    }
}

/// Edit a listing
///
/// Owner or admin only. Text fields are replaced as a whole; a sent `image`
/// or `video` replaces the current file of that kind.
#[utoipa::path(
    put,
    path = "/api/listings/{listing_id}",
    tag = "listings",
    security(("bearer_auth" = [])),
    params(("listing_id" = i32, Path, description = "Listing id")),
    request_body(content = ListingFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Listing updated", body = inline(SuccessResponse<ListingDto>)),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 502, description = "Media service failed, retry", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/api/listings/{listing_id}")]
pub async fn edit_listing_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let listing_id = path.into_inner();
    let caller = match resolve_caller_or_response(&data, user.user_id).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    let command = match ListingForm::read(payload, data.upload_policy.max_file_size_bytes)
        .await
        .and_then(|form| form.into_edit_command(listing_id))
    {
        Ok(command) => command,
        Err(e) => return form_error(&e),
    };

    match data.listing.edit.execute(caller, command).await {
        Ok(listing) => {
            info!(user_id = %user.user_id, listing_id, "Listing updated");
            ApiResponse::success(ListingDto::from(listing))
        }
        Err(e) => map_edit_error(e, listing_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::multimedia::application::domain::entities::MediaKind;
    use crate::tests::support::app_state_builder::{token_provider_data, TestAppStateBuilder};
    use crate::tests::support::fakes::{
        FakeMediaStore, FakeTokenProvider, InMemoryListings, InMemoryUsers,
    };
    use crate::tests::support::multipart::MultipartBody;
    use actix_web::{test, App};

    const VILLA_DESCRIPTION: &str = "Villa avec piscine et jardin arboré, quartier calme";

    struct Fixture {
        users: InMemoryUsers,
        listings: InMemoryListings,
        media: FakeMediaStore,
        listing_id: i32,
    }

    impl Fixture {
        fn new() -> Self {
            let users = InMemoryUsers::default();
            users.insert_with_id(7, "awa", false);
            users.insert_with_id(9, "moussa", false);
            users.insert_with_id(1, "admin", true);

            let listings = InMemoryListings::default();
            let media = FakeMediaStore::default();
            media.seed("listings/images/salon_1", MediaKind::Image);
            let listing_id =
                listings.seed_listing(UserId::from(7), &[("listings/images/salon_1", MediaKind::Image)]);

            Self {
                users,
                listings,
                media,
                listing_id,
            }
        }

        fn villa_form() -> MultipartBody {
            MultipartBody::default()
                .text("title", "Villa avec piscine")
                .text("description", VILLA_DESCRIPTION)
                .text("price", "95000000")
                .text("property_type", "vente")
        }

        async fn put_as(
            &self,
            user_id: i32,
            listing_id: i32,
            body: MultipartBody,
        ) -> (u16, serde_json::Value) {
            let app_state = TestAppStateBuilder::default()
                .with_users(&self.users)
                .with_listings(&self.listings)
                .with_media_store(&self.media)
                .build();
            let app = test::init_service(
                App::new()
                    .app_data(app_state)
                    .app_data(token_provider_data())
                    .service(edit_listing_handler),
            )
            .await;

            let req = test::TestRequest::put()
                .uri(&format!("/api/listings/{listing_id}"))
                .insert_header(("Authorization", FakeTokenProvider::bearer(UserId::from(user_id))));
            let resp = test::call_service(&app, body.into_request(req).to_request()).await;
            let status = resp.status().as_u16();
            let bytes = test::read_body(resp).await;
            (status, serde_json::from_slice(&bytes).unwrap_or_default())
        }
    }

    #[actix_web::test]
    async fn test_owner_updates_text_fields() {
        let fx = Fixture::new();

        let (status, body) = fx.put_as(7, fx.listing_id, Fixture::villa_form()).await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["title"], "Villa avec piscine");
        assert_eq!(body["data"]["property_type"], "sale");
        assert_eq!(body["data"]["price"], 95_000_000);
        assert_eq!(fx.listings.media_of(fx.listing_id).len(), 1);
        assert_eq!(fx.media.upload_calls(), 0);
    }

    #[actix_web::test]
    async fn test_other_user_is_forbidden() {
        let fx = Fixture::new();

        let (status, body) = fx.put_as(9, fx.listing_id, Fixture::villa_form()).await;

        assert_eq!(status, 403);
        assert_eq!(body["error"]["code"], "FORBIDDEN");
        let stored = fx.listings.get(fx.listing_id).unwrap();
        assert_ne!(stored.title, "Villa avec piscine");
    }

    #[actix_web::test]
    async fn test_admin_may_edit_any_listing() {
        let fx = Fixture::new();

        let (status, _) = fx.put_as(1, fx.listing_id, Fixture::villa_form()).await;

        assert_eq!(status, 200);
        assert_eq!(fx.listings.get(fx.listing_id).unwrap().title, "Villa avec piscine");
    }

    #[actix_web::test]
    async fn test_new_image_replaces_old_one() {
        let fx = Fixture::new();
        let form = Fixture::villa_form().file("image", "facade.jpg", "image/jpeg", &[0xFF, 0xD8]);

        let (status, body) = fx.put_as(7, fx.listing_id, form).await;

        assert_eq!(status, 200);
        let media = fx.listings.media_of(fx.listing_id);
        assert_eq!(media.len(), 1);
        assert!(media[0].public_id.starts_with("listings/images/facade"));
        assert_eq!(body["data"]["media"].as_array().map(Vec::len), Some(1));
        assert!(!fx
            .media
            .stored_ids()
            .contains(&"listings/images/salon_1".to_string()));
    }

    #[actix_web::test]
    async fn test_unknown_listing_is_404() {
        let fx = Fixture::new();

        let (status, body) = fx.put_as(7, 404, Fixture::villa_form()).await;

        assert_eq!(status, 404);
        assert_eq!(body["error"]["code"], "LISTING_NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_short_title_is_rejected() {
        let fx = Fixture::new();
        let form = MultipartBody::default()
            .text("title", "Vil")
            .text("description", VILLA_DESCRIPTION)
            .text("price", "95000000")
            .text("property_type", "vente");

        let (status, body) = fx.put_as(7, fx.listing_id, form).await;

        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "INVALID_TITLE");
    }
}
