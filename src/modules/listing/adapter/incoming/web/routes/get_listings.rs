use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::{debug, error};
use utoipa::IntoParams;

use super::listing_dto::ListingPageDto;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::listing::application::domain::entities::PropertyType;
use crate::listing::application::ports::outgoing::ListingFilter;
use crate::shared::api::ApiResponse;
use crate::shared::pagination::{PageParams, DEFAULT_PER_PAGE};
use crate::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingsQuery {
    /// `sale`, `rental`, `purchase` or a French alias. Unknown values are ignored.
    #[serde(rename = "type")]
    #[param(example = "rental")]
    pub property_type: Option<String>,
    #[param(example = 1, minimum = 1)]
    pub page: Option<u64>,
    #[param(example = 10, minimum = 1, maximum = 50)]
    pub per_page: Option<u64>,
}

impl ListingsQuery {
    fn filter(&self) -> ListingFilter {
        let property_type = self.property_type.as_deref().and_then(|raw| {
            raw.parse::<PropertyType>()
                .map_err(|_| debug!(value = %raw, "Ignoring unknown listing type filter"))
                .ok()
        });
        ListingFilter {
            property_type,
            owner: None,
        }
    }
}

/// Browse listings
///
/// Newest first, each listing with its media.
#[utoipa::path(
    get,
    path = "/api/listings",
    tag = "listings",
    params(ListingsQuery),
    responses(
        (status = 200, description = "Page of listings", body = inline(SuccessResponse<ListingPageDto>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/listings")]
pub async fn get_listings_handler(
    query: web::Query<ListingsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let page = PageParams {
        page: query.page,
        per_page: query.per_page,
    }
    .to_request(DEFAULT_PER_PAGE);

    match data.listing.get_list.execute(query.filter(), page).await {
        Ok(page) => ApiResponse::success(ListingPageDto::from(page)),
        Err(e) => {
            error!(error = %e, "Failed to list listings");
            ApiResponse::internal_error()
        }
    }
}
