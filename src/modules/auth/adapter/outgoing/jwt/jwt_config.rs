use crate::shared::config::{parse_number, ConfigError, Lookup, RuntimeEnv};

/// HS256 needs at least 32 bytes of key material.
pub const MIN_SECRET_LEN: usize = 32;

const DEV_FALLBACK_SECRET: &str = "development-only-secret-change-me-before-deploying";
const DEFAULT_ACCESS_EXPIRY: i64 = 86_400;
const MAX_ACCESS_EXPIRY: i64 = 7 * 86_400;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64, // Expiration in seconds
}

impl JwtConfig {
    pub fn from_lookup(lookup: Lookup, runtime: RuntimeEnv) -> Result<Self, ConfigError> {
        let secret_key = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None if runtime.is_production() => return Err(ConfigError::missing("JWT_SECRET")),
            None => {
                tracing::warn!("JWT_SECRET not set, using an insecure development secret");
                DEV_FALLBACK_SECRET.to_string()
            }
        };

        if secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                format!("must be at least {MIN_SECRET_LEN} characters long"),
            ));
        }

        let access_token_expiry = parse_number(lookup, "JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_EXPIRY)?;
        if access_token_expiry <= 0 || access_token_expiry > MAX_ACCESS_EXPIRY {
            return Err(ConfigError::invalid(
                "JWT_ACCESS_EXPIRY",
                format!("must be between 1 and {MAX_ACCESS_EXPIRY} seconds"),
            ));
        }

        let issuer = lookup("JWT_ISSUER").unwrap_or_else(|| "immo-backend".to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
        })
    }
}
