pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::admin;
pub use modules::auth;
pub use modules::listing;
pub use modules::multimedia;

use crate::admin::application::admin_use_cases::AdminUseCases;
use crate::auth::adapter::outgoing::jwt::JwtTokenService;
use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::helpers::CallerResolver;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::auth::application::use_cases::bootstrap_admin::{
    AdminIdentity, BootstrapAdminUseCase, BootstrapOutcome,
};
use crate::auth::application::use_cases::{
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    register_user::{IRegisterUserUseCase, RegisterUserUseCase},
};
use crate::listing::adapter::outgoing::{ListingQueryPostgres, ListingStorePostgres};
use crate::listing::application::listing_use_cases::ListingUseCases;
use crate::multimedia::adapter::outgoing::cloudinary::CloudinaryMediaStore;
use crate::multimedia::adapter::outgoing::disabled_media_store::DisabledMediaStore;
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::ports::outgoing::MediaStore;
use crate::shared::api::{custom_json_config, custom_path_config, custom_query_config};
use crate::shared::config::{AppConfig, RuntimeEnv};

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub register_user_use_case: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub caller_resolver: CallerResolver,
    pub listing: ListingUseCases,
    pub admin: AdminUseCases,
    /// Limits applied while reading multipart bodies.
    pub upload_policy: UploadPolicy,
}

fn load_env_files() {
    // .env.{environment} first, then .env
    let env_file = format!(".env.{}", RuntimeEnv::from_env().as_str());
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }
}

fn build_media_store(config: &AppConfig) -> std::io::Result<Arc<dyn MediaStore>> {
    match &config.media_store {
        Some(cloudinary) => {
            let store = CloudinaryMediaStore::new(cloudinary.clone(), config.upload_policy.clone())
                .map_err(std::io::Error::other)?;
            info!("Media store: Cloudinary");
            Ok(Arc::new(store))
        }
        None => {
            warn!("Media store credentials missing; uploads are disabled");
            Ok(Arc::new(DisabledMediaStore))
        }
    }
}

async fn bootstrap_admin(
    identity: &AdminIdentity,
    users: UserQueryPostgres,
    repository: UserRepositoryPostgres,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
) {
    let use_case = BootstrapAdminUseCase::new(users, repository, hasher);
    match use_case.execute(identity).await {
        Ok(BootstrapOutcome::Created(user)) => {
            info!(user_id = %user.id, username = %user.username, "Admin account created")
        }
        Ok(BootstrapOutcome::Promoted(user)) => {
            info!(user_id = %user.id, username = %user.username, "Existing account promoted to admin")
        }
        Ok(BootstrapOutcome::AlreadyAdmin(user)) => {
            info!(user_id = %user.id, username = %user.username, "Admin account already exists")
        }
        Err(e) => error!(error = %e, "Admin bootstrap failed"),
    }
}

async fn connect_database(url: &str) -> std::io::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(url.to_owned());
    opt.max_connections(50)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    Database::connect(opt).await.map_err(std::io::Error::other)
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    load_env_files();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(std::io::Error::other(e));
        }
    };
    info!(environment = config.runtime.as_str(), "Starting application...");

    let db_arc = Arc::new(connect_database(&config.database_url).await?);

    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let listing_store = ListingStorePostgres::new(Arc::clone(&db_arc));
    let listing_query = ListingQueryPostgres::new(Arc::clone(&db_arc));

    let password_hasher: Arc<dyn PasswordHasher + Send + Sync> =
        Arc::new(Argon2Hasher::for_runtime(config.runtime));
    let jwt_service = JwtTokenService::new(config.jwt.clone());
    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let media_store = build_media_store(&config)?;

    if let Some(identity) = &config.admin_bootstrap {
        bootstrap_admin(
            identity,
            user_query.clone(),
            user_repo.clone(),
            password_hasher.clone(),
        )
        .await;
    }

    let state = AppState {
        register_user_use_case: Arc::new(RegisterUserUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            password_hasher.clone(),
        )),
        login_user_use_case: Arc::new(LoginUserUseCase::new(
            user_query.clone(),
            password_hasher,
            Arc::clone(&token_provider_arc),
        )),
        caller_resolver: CallerResolver::new(Arc::new(user_query.clone())),
        listing: ListingUseCases::wire(
            listing_store,
            listing_query.clone(),
            Arc::clone(&media_store),
            config.upload_policy.clone(),
        ),
        admin: AdminUseCases::wire(user_query, user_repo, listing_query, media_store),
        upload_policy: config.upload_policy.clone(),
    };

    let server_url = config.server_url();
    info!(address = %server_url, "Server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(custom_path_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_user_handler);
    // Listings
    cfg.service(crate::listing::adapter::incoming::web::routes::get_listings_handler);
    cfg.service(crate::listing::adapter::incoming::web::routes::get_single_listing_handler);
    cfg.service(crate::listing::adapter::incoming::web::routes::publish_listing_handler);
    cfg.service(crate::listing::adapter::incoming::web::routes::edit_listing_handler);
    cfg.service(crate::listing::adapter::incoming::web::routes::delete_listing_handler);
    // Admin
    cfg.service(crate::admin::adapter::incoming::web::routes::get_dashboard_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::list_users_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::list_all_listings_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::toggle_admin_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::delete_user_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
