use async_trait::async_trait;

use crate::auth::application::domain::entities::{User, UserId};

#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub username: String,
    pub phone: String,
    pub password_hash: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, data: CreateUserData) -> Result<User, UserRepositoryError>;

    async fn set_admin(&self, user_id: UserId, is_admin: bool) -> Result<User, UserRepositoryError>;

    /// Removes the user's media rows, listings and account in one transaction.
    /// Remote media objects are the caller's responsibility.
    async fn delete_user(&self, user_id: UserId) -> Result<(), UserRepositoryError>;
}
