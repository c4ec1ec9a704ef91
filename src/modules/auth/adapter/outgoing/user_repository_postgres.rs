use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;

use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::user_repository::{
    CreateUserData, UserRepository, UserRepositoryError,
};
use crate::listing::adapter::outgoing::sea_orm_entity::{media, property_listings};

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub(crate) fn map_to_user(model: UserModel) -> User {
        User {
            id: UserId::from(model.id),
            username: model.username,
            phone: model.phone,
            is_admin: model.is_admin,
            created_at: model.created_at.into(),
        }
    }

    /// Children first: media rows, then listings, then the account.
    async fn delete_user_cascade(
        txn: &DatabaseTransaction,
        user_id: i32,
    ) -> Result<(), UserRepositoryError> {
        let listing_ids: Vec<i32> = property_listings::Entity::find()
            .filter(property_listings::Column::UserId.eq(user_id))
            .all(txn)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|l| l.id)
            .collect();

        if !listing_ids.is_empty() {
            let removed_media = media::Entity::delete_many()
                .filter(media::Column::ListingId.is_in(listing_ids.clone()))
                .exec(txn)
                .await
                .map_err(map_db_err)?;

            property_listings::Entity::delete_many()
                .filter(property_listings::Column::Id.is_in(listing_ids.clone()))
                .exec(txn)
                .await
                .map_err(map_db_err)?;

            tracing::debug!(
                user_id,
                listings = listing_ids.len(),
                media = removed_media.rows_affected,
                "Removed listings of deleted user"
            );
        }

        let deleted = UserEntity::delete_by_id(user_id)
            .exec(txn)
            .await
            .map_err(map_db_err)?;

        if deleted.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }

        Ok(())
    }
}

fn map_db_err(e: DbErr) -> UserRepositoryError {
    UserRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, data: CreateUserData) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: NotSet,
            username: Set(data.username),
            phone: Set(data.phone),
            password_hash: Set(data.password_hash),
            is_admin: Set(data.is_admin),
            created_at: NotSet,
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505")
                || err_str.contains("duplicate key")
                || err_str.contains("unique constraint")
            {
                return UserRepositoryError::UserAlreadyExists;
            }
            map_db_err(e)
        })?;

        Ok(Self::map_to_user(inserted))
    }

    async fn set_admin(&self, user_id: UserId, is_admin: bool) -> Result<User, UserRepositoryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(UserRepositoryError::UserNotFound)?;

        let mut active_user: UserActiveModel = user.into();
        active_user.is_admin = Set(is_admin);

        let updated = active_user.update(&*self.db).await.map_err(map_db_err)?;

        Ok(Self::map_to_user(updated))
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), UserRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        match Self::delete_user_cascade(&txn, user_id.value()).await {
            Ok(()) => txn.commit().await.map_err(map_db_err),
            Err(e) => {
                let _ = txn.rollback().await;
                Err(e)
            }
        }
    }
}
