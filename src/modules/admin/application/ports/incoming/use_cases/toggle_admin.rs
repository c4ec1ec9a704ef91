use async_trait::async_trait;

use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::domain::policies::{Caller, DenyReason};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleAdminError {
    #[error("User not found")]
    UserNotFound,

    #[error("Access denied: {}", .0.message())]
    AccessDenied(DenyReason),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ToggleAdminUseCase: Send + Sync {
    /// Flips the target's admin flag and returns the updated account.
    async fn execute(&self, caller: Caller, target: UserId) -> Result<User, ToggleAdminError>;
}
