use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::admin::application::ports::incoming::use_cases::{
    DeleteUserError, DeleteUserUseCase, DeletedUser,
};
use crate::auth::application::domain::entities::UserId;
use crate::auth::application::domain::policies::{
    authorize_admin, authorize_admin_action, AdminAction, Caller, TargetUser,
};
use crate::auth::application::ports::outgoing::{UserQuery, UserRepository, UserRepositoryError};
use crate::listing::application::ports::outgoing::ListingQuery;
use crate::multimedia::application::domain::entities::MediaKind;
use crate::multimedia::application::ports::outgoing::MediaStore;
use crate::multimedia::application::services::discard_remote_objects;

/// Removes a non-admin account with everything it owns.
///
/// Remote media objects go first and failures there are only counted. The
/// rows are then removed by the repository in one transaction
/// (media, listings, user).
pub struct DeleteUserService<Q, R, L>
where
    Q: UserQuery,
    R: UserRepository,
    L: ListingQuery,
{
    query: Q,
    repository: R,
    listings: L,
    media_store: Arc<dyn MediaStore>,
}

impl<Q, R, L> DeleteUserService<Q, R, L>
where
    Q: UserQuery,
    R: UserRepository,
    L: ListingQuery,
{
    pub fn new(query: Q, repository: R, listings: L, media_store: Arc<dyn MediaStore>) -> Self {
        Self {
            query,
            repository,
            listings,
            media_store,
        }
    }
}

#[async_trait]
impl<Q, R, L> DeleteUserUseCase for DeleteUserService<Q, R, L>
where
    Q: UserQuery,
    R: UserRepository,
    L: ListingQuery,
{
    async fn execute(&self, caller: Caller, target: UserId) -> Result<DeletedUser, DeleteUserError> {
        authorize_admin(&caller)
            .into_result()
            .map_err(DeleteUserError::AccessDenied)?;

        let row = self
            .query
            .find_by_id(target)
            .await
            .map_err(|e| DeleteUserError::RepositoryError(e.to_string()))?
            .ok_or(DeleteUserError::UserNotFound)?;

        let target_user = TargetUser {
            id: row.id,
            is_admin: row.is_admin,
        };
        if let Err(reason) =
            authorize_admin_action(&caller, target_user, AdminAction::DeleteUser).into_result()
        {
            warn!(caller = ?caller.id(), target = %target, reason = ?reason, "User deletion denied");
            return Err(DeleteUserError::AccessDenied(reason));
        }

        let objects: Vec<(String, MediaKind)> = self
            .listings
            .media_for_owner(target)
            .await
            .map_err(|e| {
                error!(target = %target, error = %e, "Failed to load user media");
                DeleteUserError::RepositoryError(e.to_string())
            })?
            .into_iter()
            .map(|m| (m.public_id, m.file_type))
            .collect();

        let remote_failures = discard_remote_objects(self.media_store.as_ref(), &objects).await;

        self.repository
            .delete_user(target)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => DeleteUserError::UserNotFound,
                other => {
                    error!(caller = ?caller.id(), target = %target, error = %other, "Failed to delete user");
                    DeleteUserError::RepositoryError(other.to_string())
                }
            })?;

        info!(
            caller = ?caller.id(),
            target = %target,
            media_objects = objects.len(),
            remote_failures,
            "User deleted"
        );

        Ok(DeletedUser {
            user_id: target,
            media_objects: objects.len(),
            remote_failures,
        })
    }
}
