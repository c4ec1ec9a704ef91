use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::admin::application::ports::incoming::use_cases::{ToggleAdminError, ToggleAdminUseCase};
use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::domain::policies::{
    authorize_admin, authorize_admin_action, AdminAction, Caller, TargetUser,
};
use crate::auth::application::ports::outgoing::{UserQuery, UserRepository, UserRepositoryError};

pub struct ToggleAdminService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> ToggleAdminService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> ToggleAdminUseCase for ToggleAdminService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, caller: Caller, target: UserId) -> Result<User, ToggleAdminError> {
        authorize_admin(&caller)
            .into_result()
            .map_err(ToggleAdminError::AccessDenied)?;

        let row = self
            .query
            .find_by_id(target)
            .await
            .map_err(|e| ToggleAdminError::RepositoryError(e.to_string()))?
            .ok_or(ToggleAdminError::UserNotFound)?;

        let target_user = TargetUser {
            id: row.id,
            is_admin: row.is_admin,
        };
        if let Err(reason) =
            authorize_admin_action(&caller, target_user, AdminAction::ToggleAdmin).into_result()
        {
            warn!(caller = ?caller.id(), target = %target, "Admin toggle denied");
            return Err(ToggleAdminError::AccessDenied(reason));
        }

        let updated = self
            .repository
            .set_admin(target, !row.is_admin)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => ToggleAdminError::UserNotFound,
                other => {
                    error!(caller = ?caller.id(), target = %target, error = %other, "Failed to update admin flag");
                    ToggleAdminError::RepositoryError(other.to_string())
                }
            })?;

        info!(
            caller = ?caller.id(),
            target = %target,
            is_admin = updated.is_admin,
            "Admin flag toggled"
        );
        Ok(updated)
    }
}
