use async_trait::async_trait;
use serde::Serialize;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::domain::policies::{Caller, DenyReason};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedUser {
    pub user_id: UserId,
    /// Remote media objects the deletion tried to remove.
    pub media_objects: usize,
    pub remote_failures: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Access denied: {}", .0.message())]
    AccessDenied(DenyReason),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait DeleteUserUseCase: Send + Sync {
    async fn execute(&self, caller: Caller, target: UserId) -> Result<DeletedUser, DeleteUserError>;
}
