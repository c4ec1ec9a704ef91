//! Startup configuration read from the process environment.
//!
//! Every value is resolved once in `main` and handed to the components that need it.
//! Outside production, missing secrets fall back to development defaults with a warning.
//! In production, missing critical values stop startup.

use std::env;

use crate::auth::adapter::outgoing::jwt::JwtConfig;
use crate::auth::application::use_cases::bootstrap_admin::AdminIdentity;
use crate::multimedia::adapter::outgoing::cloudinary::CloudinaryConfig;
use crate::multimedia::application::domain::policies::UploadPolicy;

/// Resolves a variable name to its value. Blank values count as unset.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_ADMIN_PHONE: &str = "+221123456789";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Development,
    Test,
    Production,
}

impl RuntimeEnv {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => RuntimeEnv::Production,
            "test" => RuntimeEnv::Test,
            _ => RuntimeEnv::Development,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(&env::var("RUST_ENV").unwrap_or_default())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeEnv::Development => "development",
            RuntimeEnv::Test => "test",
            RuntimeEnv::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RuntimeEnv::Production)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },

    #[error("insecure configuration: {0}")]
    Insecure(String),
}

impl ConfigError {
    pub fn missing(name: &str) -> Self {
        ConfigError::Missing(vec![name.to_string()])
    }

    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Process environment lookup used by `AppConfig::from_env`.
pub fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub fn parse_number<T: std::str::FromStr>(
    lookup: Lookup,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::invalid(name, format!("'{raw}' is not a number"))),
        None => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub runtime: RuntimeEnv,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt: JwtConfig,
    /// `None` outside production when no media credentials are configured.
    pub media_store: Option<CloudinaryConfig>,
    pub upload_policy: UploadPolicy,
    pub admin_bootstrap: Option<AdminIdentity>,
}

impl AppConfig {
    #[cfg(not(tarpaulin_include))]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup) -> Result<Self, ConfigError> {
        let runtime = RuntimeEnv::parse(&lookup("RUST_ENV").unwrap_or_default());
        let mut missing: Vec<String> = Vec::new();

        let database_url = lookup("DATABASE_URL");
        if database_url.is_none() {
            missing.push("DATABASE_URL".to_string());
        }

        let jwt = collect_missing(JwtConfig::from_lookup(lookup, runtime), &mut missing)?;

        let media_store = CloudinaryConfig::from_lookup(lookup)?;
        if media_store.is_none() && runtime.is_production() {
            missing.push("CLOUDINARY_URL".to_string());
        }

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let (Some(database_url), Some(jwt)) = (database_url, jwt) else {
            return Err(ConfigError::missing("DATABASE_URL"));
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_number(lookup, "PORT", DEFAULT_PORT)?;

        Ok(Self {
            runtime,
            host,
            port,
            database_url,
            jwt,
            media_store,
            upload_policy: UploadPolicy::from_lookup(lookup),
            admin_bootstrap: admin_identity_from_lookup(lookup, runtime)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Accumulates `Missing` errors so startup reports every absent variable at once.
fn collect_missing<T>(
    result: Result<T, ConfigError>,
    missing: &mut Vec<String>,
) -> Result<Option<T>, ConfigError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::Missing(names)) => {
            missing.extend(names);
            Ok(None)
        }
        Err(other) => Err(other),
    }
}

/// Bootstrap runs only when `ADMIN_USERNAME` is set.
fn admin_identity_from_lookup(
    lookup: Lookup,
    runtime: RuntimeEnv,
) -> Result<Option<AdminIdentity>, ConfigError> {
    let Some(username) = lookup("ADMIN_USERNAME") else {
        return Ok(None);
    };

    let phone = lookup("ADMIN_PHONE").unwrap_or_else(|| DEFAULT_ADMIN_PHONE.to_string());

    let password = match lookup("ADMIN_PASSWORD") {
        Some(p) => p,
        None if runtime.is_production() => return Err(ConfigError::missing("ADMIN_PASSWORD")),
        None => {
            tracing::warn!("ADMIN_PASSWORD not set, using the development default");
            DEFAULT_ADMIN_PASSWORD.to_string()
        }
    };

    if runtime.is_production() && password == DEFAULT_ADMIN_PASSWORD {
        return Err(ConfigError::Insecure(
            "ADMIN_PASSWORD must not use the default value in production".to_string(),
        ));
    }

    Ok(Some(AdminIdentity {
        username: username.trim().to_string(),
        phone: phone.trim().to_string(),
        password,
    }))
}
