use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::sync::Arc;

use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::user_query::{
    UserQuery, UserQueryError, UserQueryResult,
};
use crate::shared::pagination::{Page, PageRequest};

use super::sea_orm_entity::users::{Column, Entity as UserEntity, Model as UserModel};
use super::user_repository_postgres::UserRepositoryPostgres;

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_query_result(model: UserModel) -> UserQueryResult {
        UserQueryResult {
            id: UserId::from(model.id),
            username: model.username,
            phone: model.phone,
            password_hash: model.password_hash,
            is_admin: model.is_admin,
            created_at: model.created_at.into(),
        }
    }
}

fn map_db_err(e: DbErr) -> UserQueryError {
    UserQueryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserQueryResult>, UserQueryError> {
        let model = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Self::map_to_query_result))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserQueryResult>, UserQueryError> {
        let model = UserEntity::find()
            .filter(Column::Username.eq(username.trim()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Self::map_to_query_result))
    }

    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, UserQueryError> {
        let query = UserEntity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let total = query.clone().count(&*self.db).await.map_err(map_db_err)?;

        let users = query
            .offset(page.offset())
            .limit(page.per_page)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Page {
            items: users
                .into_iter()
                .map(UserRepositoryPostgres::map_to_user)
                .collect(),
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn count_users(&self) -> Result<u64, UserQueryError> {
        UserEntity::find()
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn count_admins(&self) -> Result<u64, UserQueryError> {
        UserEntity::find()
            .filter(Column::IsAdmin.eq(true))
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }
}
