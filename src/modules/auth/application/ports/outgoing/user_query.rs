// application/ports/outgoing/user_query.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::{User, UserId};
use crate::shared::pagination::{Page, PageRequest};

/// Full user row, including the password hash needed by login.
#[derive(Debug, Clone)]
pub struct UserQueryResult {
    pub id: UserId,
    pub username: String,
    pub phone: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserQueryResult> for User {
    fn from(r: UserQueryResult) -> Self {
        User {
            id: r.id,
            username: r.username,
            phone: r.phone,
            is_admin: r.is_admin,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserQueryResult>, UserQueryError>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserQueryResult>, UserQueryError>;

    /// Newest first.
    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, UserQueryError>;

    async fn count_users(&self) -> Result<u64, UserQueryError>;

    async fn count_admins(&self) -> Result<u64, UserQueryError>;
}
