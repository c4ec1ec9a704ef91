use actix_web::web;
use std::sync::Arc;

use crate::admin::application::admin_use_cases::AdminUseCases;
use crate::auth::application::helpers::CallerResolver;
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::auth::application::use_cases::login_user::{ILoginUserUseCase, LoginUserUseCase};
use crate::auth::application::use_cases::register_user::{
    IRegisterUserUseCase, RegisterUserUseCase,
};
use crate::listing::application::listing_use_cases::ListingUseCases;
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::ports::outgoing::MediaStore;
use crate::tests::support::fakes::{
    FakeMediaStore, FakePasswordHasher, FakeTokenProvider, InMemoryListings, InMemoryUsers,
};
use crate::AppState;

/// Builds an `AppState` whose services run over the in-memory fakes.
///
/// Pass shared fakes with `with_users` / `with_listings` / `with_media_store`
/// to seed them before the request and inspect them afterwards.
#[derive(Default)]
pub struct TestAppStateBuilder {
    users: InMemoryUsers,
    listings: InMemoryListings,
    media_store: FakeMediaStore,
    upload_policy: UploadPolicy,
    register_user: Option<Arc<dyn IRegisterUserUseCase + Send + Sync>>,
    login_user: Option<Arc<dyn ILoginUserUseCase + Send + Sync>>,
}

impl TestAppStateBuilder {
    pub fn with_users(mut self, users: &InMemoryUsers) -> Self {
        self.users = users.clone();
        self
    }

    pub fn with_listings(mut self, listings: &InMemoryListings) -> Self {
        self.listings = listings.clone();
        self
    }

    pub fn with_media_store(mut self, media_store: &FakeMediaStore) -> Self {
        self.media_store = media_store.clone();
        self
    }

    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.upload_policy = policy;
        self
    }

    pub fn with_register_user(mut self, uc: impl IRegisterUserUseCase + 'static) -> Self {
        self.register_user = Some(Arc::new(uc));
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + 'static) -> Self {
        self.login_user = Some(Arc::new(uc));
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let media_store: Arc<dyn MediaStore> = Arc::new(self.media_store.clone());

        let register_user_use_case = self.register_user.unwrap_or_else(|| {
            Arc::new(RegisterUserUseCase::new(
                self.users.clone(),
                self.users.clone(),
                Arc::new(FakePasswordHasher),
            ))
        });
        let login_user_use_case = self.login_user.unwrap_or_else(|| {
            Arc::new(LoginUserUseCase::new(
                self.users.clone(),
                Arc::new(FakePasswordHasher),
                Arc::new(FakeTokenProvider),
            ))
        });
        let listing = ListingUseCases::wire(
            self.listings.clone(),
            self.listings.clone(),
            media_store.clone(),
            self.upload_policy.clone(),
        );
        let admin = AdminUseCases::wire(
            self.users.clone(),
            self.users.clone(),
            self.listings.clone(),
            media_store,
        );

        web::Data::new(AppState {
            register_user_use_case,
            login_user_use_case,
            caller_resolver: CallerResolver::new(Arc::new(self.users)),
            listing,
            admin,
            upload_policy: self.upload_policy,
        })
    }
}

/// Token provider registered the way `main` registers the JWT service.
pub fn token_provider_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(FakeTokenProvider);
    web::Data::new(provider)
}
