use std::sync::Arc;

use crate::listing::application::ports::incoming::use_cases::{
    DeleteListingUseCase, EditListingUseCase, GetListingsUseCase, GetSingleListingUseCase,
    PublishListingUseCase,
};
use crate::listing::application::ports::outgoing::{ListingQuery, ListingStore};
use crate::listing::application::service::{
    DeleteListingService, EditListingService, GetListingsService, GetSingleListingService,
    PublishListingService,
};
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::ports::outgoing::MediaStore;

#[derive(Clone)]
pub struct ListingUseCases {
    pub publish: Arc<dyn PublishListingUseCase + Send + Sync>,
    pub edit: Arc<dyn EditListingUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteListingUseCase + Send + Sync>,
    pub get_list: Arc<dyn GetListingsUseCase + Send + Sync>,
    pub get_single: Arc<dyn GetSingleListingUseCase + Send + Sync>,
}

impl ListingUseCases {
    /// Builds every listing service over one store, one query side and one media store.
    pub fn wire<S, Q>(
        store: S,
        query: Q,
        media_store: Arc<dyn MediaStore>,
        policy: UploadPolicy,
    ) -> Self
    where
        S: ListingStore + Clone + 'static,
        Q: ListingQuery + Clone + 'static,
    {
        Self {
            publish: Arc::new(PublishListingService::new(
                store.clone(),
                media_store.clone(),
                policy.clone(),
            )),
            edit: Arc::new(EditListingService::new(
                store.clone(),
                query.clone(),
                media_store.clone(),
                policy,
            )),
            delete: Arc::new(DeleteListingService::new(
                store,
                query.clone(),
                media_store,
            )),
            get_list: Arc::new(GetListingsService::new(query.clone())),
            get_single: Arc::new(GetSingleListingService::new(query)),
        }
    }
}
