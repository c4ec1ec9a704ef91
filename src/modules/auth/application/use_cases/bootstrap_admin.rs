//! Ensures the configured administrator account exists at startup.

use std::sync::Arc;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::{
    CreateUserData, PasswordHasher, UserQuery, UserRepository,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub username: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapOutcome {
    Created(User),
    /// An existing regular account with the configured username was promoted.
    Promoted(User),
    AlreadyAdmin(User),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapAdminError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

pub struct BootstrapAdminUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl<Q, R> BootstrapAdminUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }

    /// Never changes the password of an existing account.
    pub async fn execute(
        &self,
        identity: &AdminIdentity,
    ) -> Result<BootstrapOutcome, BootstrapAdminError> {
        let existing = self
            .query
            .find_by_username(&identity.username)
            .await
            .map_err(|e| BootstrapAdminError::RepositoryError(e.to_string()))?;

        if let Some(user) = existing {
            if user.is_admin {
                return Ok(BootstrapOutcome::AlreadyAdmin(user.into()));
            }

            let promoted = self
                .repository
                .set_admin(user.id, true)
                .await
                .map_err(|e| BootstrapAdminError::RepositoryError(e.to_string()))?;

            return Ok(BootstrapOutcome::Promoted(promoted));
        }

        let password_hash = self
            .password_hasher
            .hash_password(&identity.password)
            .await
            .map_err(|e| BootstrapAdminError::HashingFailed(e.to_string()))?;

        let created = self
            .repository
            .create_user(CreateUserData {
                username: identity.username.clone(),
                phone: identity.phone.clone(),
                password_hash,
                is_admin: true,
            })
            .await
            .map_err(|e| BootstrapAdminError::RepositoryError(e.to_string()))?;

        Ok(BootstrapOutcome::Created(created))
    }
}
