use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::domain::policies::Caller;
use crate::auth::application::ports::outgoing::user_query::{UserQuery, UserQueryError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveCallerError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Turns a verified token subject into a `Caller`.
///
/// A token whose user has since been deleted resolves to `Caller::Anonymous`.
#[derive(Clone)]
pub struct CallerResolver {
    user_query: Arc<dyn UserQuery + Send + Sync>,
}

impl CallerResolver {
    pub fn new(user_query: Arc<dyn UserQuery + Send + Sync>) -> Self {
        Self { user_query }
    }

    pub async fn resolve(&self, user_id: UserId) -> Result<Caller, ResolveCallerError> {
        match self.user_query.find_by_id(user_id).await {
            Ok(Some(user)) => Ok(Caller::Authenticated {
                id: user.id,
                is_admin: user.is_admin,
            }),
            Ok(None) => Ok(Caller::Anonymous),
            Err(UserQueryError::DatabaseError(msg)) => {
                Err(ResolveCallerError::RepositoryError(msg))
            }
        }
    }
}
