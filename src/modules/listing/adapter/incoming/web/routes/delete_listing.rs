use actix_web::{delete, web, Responder};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use super::listing_errors::access_denied;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{
    resolve_caller_or_response, AuthenticatedUser,
};
use crate::listing::application::ports::incoming::use_cases::{
    DeleteListingError, DeletedListing,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedListingDto {
    #[schema(example = 12)]
    pub listing_id: i32,
    /// Media rows removed with the listing
    #[schema(example = 2)]
    pub media_deleted: u64,
    /// Files the media service could not remove
    #[schema(example = 0)]
    pub remote_failures: usize,
}

impl From<DeletedListing> for DeletedListingDto {
    fn from(d: DeletedListing) -> Self {
        Self {
            listing_id: d.listing_id,
            media_deleted: d.media_deleted,
            remote_failures: d.remote_failures,
        }
    }
}

/// Delete a listing
///
/// Owner or admin only. Remote files are removed first, then the rows.
#[utoipa::path(
    delete,
    path = "/api/listings/{listing_id}",
    tag = "listings",
    security(("bearer_auth" = [])),
    params(("listing_id" = i32, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing deleted", body = inline(SuccessResponse<DeletedListingDto>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/listings/{listing_id}")]
pub async fn delete_listing_handler(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    let listing_id = path.into_inner();
    let caller = match resolve_caller_or_response(&data, user.user_id).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match data.listing.delete.execute(caller, listing_id).await {
        Ok(deleted) => {
            info!(user_id = %user.user_id, listing_id, "Listing removed");
            ApiResponse::success(DeletedListingDto::from(deleted))
        }
        Err(DeleteListingError::NotFound) => {
            ApiResponse::not_found("LISTING_NOT_FOUND", "Listing not found")
        }
        Err(DeleteListingError::AccessDenied(reason)) => access_denied(reason),
        Err(DeleteListingError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, listing_id, error = %e, "Failed to delete listing");
            ApiResponse::internal_error()
        }
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
    use crate::listing::adapter::incoming::web::routes::publish_listing_handler;
    use actix_web::{test, App};

    fn users() -> InMemoryUsers {
        let users = InMemoryUsers::default();
        users.insert_with_id(7, "awa", false);
        users.insert_with_id(9, "moussa", false);
        users.insert_with_id(1, "admin", true);
        users
    }

    async fn delete_as(
        users: &InMemoryUsers,
        listings: &InMemoryListings,
        media: &FakeMediaStore,
        user_id: i32,
        listing_id: i32,
    ) -> (u16, serde_json::Value) {
        let app_state = TestAppStateBuilder::default()
            .with_users(users)
            .with_listings(listings)
            .with_media_store(media)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_data())
                .service(delete_listing_handler),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/listings/{listing_id}"))
            .insert_header(("Authorization", FakeTokenProvider::bearer(UserId::from(user_id))))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let bytes = test::read_body(resp).await;
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[actix_web::test]
    async fn test_published_listing_cannot_be_deleted_by_another_user() {
        let users = users();
        let listings = InMemoryListings::default();
        let media = FakeMediaStore::default();

        let app_state = TestAppStateBuilder::default()
            .with_users(&users)
            .with_listings(&listings)
            .with_media_store(&media)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_data())
                .service(publish_listing_handler)
                .service(delete_listing_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/listings")
            .insert_header(("Authorization", FakeTokenProvider::bearer(UserId::from(7))));
        let req = MultipartBody::default()
            .listing_fields()
            .jpeg()
            .into_request(req)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let listing_id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/listings/{listing_id}"))
            .insert_header(("Authorization", FakeTokenProvider::bearer(UserId::from(9))))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 403);
        assert_eq!(listings.listing_count(), 1);
        assert_eq!(listings.media_count(), 1);
        assert_eq!(media.delete_calls(), 0);
    }

    #[actix_web::test]
    async fn test_owner_deletes_listing_and_media() {
        let users = users();
        let listings = InMemoryListings::default();
        let media = FakeMediaStore::default();
        media.seed("listings/images/salon_1", MediaKind::Image);
        media.seed("listings/videos/visite_2", MediaKind::Video);
        let id = listings.seed_listing(
            UserId::from(7),
            &[
                ("listings/images/salon_1", MediaKind::Image),
                ("listings/videos/visite_2", MediaKind::Video),
            ],
        );

        let (status, body) = delete_as(&users, &listings, &media, 7, id).await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["listing_id"], id);
        assert_eq!(body["data"]["media_deleted"], 2);
        assert_eq!(body["data"]["remote_failures"], 0);
        assert_eq!(listings.listing_count(), 0);
        assert!(media.stored_ids().is_empty());
    }

    #[actix_web::test]
    async fn test_admin_delete_survives_remote_failures() {
        let users = users();
        let listings = InMemoryListings::default();
        let media = FakeMediaStore::default();
        media.fail_deletes();
        let id = listings.seed_listing(
            UserId::from(7),
            &[("listings/images/salon_1", MediaKind::Image)],
        );

        let (status, body) = delete_as(&users, &listings, &media, 1, id).await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["remote_failures"], 1);
        assert_eq!(listings.listing_count(), 0);
    }

    #[actix_web::test]
    async fn test_unknown_listing_is_404() {
        let users = users();
        let listings = InMemoryListings::default();
        let media = FakeMediaStore::default();

        let (status, body) = delete_as(&users, &listings, &media, 7, 404).await;

        assert_eq!(status, 404);
        assert_eq!(body["error"]["code"], "LISTING_NOT_FOUND");
    }
}
