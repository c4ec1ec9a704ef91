use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::application::domain::entities::User;

/// Public representation of a user account.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    #[schema(example = 7)]
    pub id: i32,

    #[schema(example = "awa_diop")]
    pub username: String,

    #[schema(example = "+221771234567")]
    pub phone: String,

    #[schema(example = false)]
    pub is_admin: bool,

    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            username: user.username,
            phone: user.phone,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}
