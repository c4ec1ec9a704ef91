use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use std::fmt;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider, ACCESS_TOKEN_TYPE,
};

use super::jwt_config::JwtConfig;

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn generate_token(
        &self,
        user_id: UserId,
        token_type: &str,
        expiry_seconds: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(expiry_seconds);

        let claims = TokenClaims {
            sub: user_id.value(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.issuer.clone(),
            token_type: token_type.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(&self, user_id: UserId) -> Result<String, TokenError> {
        self.generate_token(user_id, ACCESS_TOKEN_TYPE, self.config.access_token_expiry)
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);

        let decoded = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;

            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token verification failed: Token expired");
                    TokenError::TokenExpired
                }
                ErrorKind::ImmatureSignature => {
                    tracing::warn!("Token verification failed: Token not yet valid");
                    TokenError::TokenNotYetValid
                }
                ErrorKind::InvalidSignature => {
                    tracing::error!("Security alert: Invalid token signature detected");
                    TokenError::InvalidSignature
                }
                ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                    tracing::error!("Security alert: Malformed or invalid algorithm token");
                    TokenError::MalformedToken
                }
                _ => {
                    tracing::warn!(error = %e, "Token verification failed");
                    TokenError::MalformedToken
                }
            }
        })?;

        if decoded.claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(TokenError::InvalidTokenType(ACCESS_TOKEN_TYPE.to_string()));
        }

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiry: i64) -> JwtConfig {
        JwtConfig {
            secret_key: secret.to_string(),
            issuer: "immo-test".to_string(),
            access_token_expiry: expiry,
        }
    }

    fn create_test_jwt_service() -> JwtTokenService {
        JwtTokenService::new(config("FAKE_JWT_SECRET_DO_NOT_USE_IN_PRODUCTION", 3600))
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let service = create_test_jwt_service();

        let token = service.generate_access_token(UserId::from(7)).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.user_id(), UserId::from(7));
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.iss, "immo-test");
    }

    #[test]
    fn test_invalid_token_verification() {
        let service = create_test_jwt_service();

        let result = service.verify_token("invalid.jwt.token");

        assert!(matches!(result, Err(TokenError::MalformedToken)));
    }

    #[test]
    fn test_expired_token() {
        // Beyond the 30s leeway
        let service = JwtTokenService::new(config("FAKE_JWT_SECRET_DO_NOT_USE_IN_PRODUCTION", -35));

        let token = service.generate_access_token(UserId::from(1)).unwrap();

        assert!(matches!(
            service.verify_token(&token),
            Err(TokenError::TokenExpired)
        ));
    }

    #[test]
    fn test_invalid_signature() {
        let service = create_test_jwt_service();
        let other = JwtTokenService::new(config("ANOTHER_SECRET_THAT_IS_LONG_ENOUGH_1234", 3600));

        let token = service.generate_access_token(UserId::from(1)).unwrap();

        assert!(matches!(
            other.verify_token(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let secret = "FAKE_JWT_SECRET_DO_NOT_USE_IN_PRODUCTION";
        let service = create_test_jwt_service();
        let foreign = JwtTokenService::new(JwtConfig {
            issuer: "someone-else".to_string(),
            ..config(secret, 3600)
        });

        let token = foreign.generate_access_token(UserId::from(1)).unwrap();

        assert!(service.verify_token(&token).is_err());
    }
}
