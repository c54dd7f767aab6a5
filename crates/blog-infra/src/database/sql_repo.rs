//! SQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use blog_core::domain::{NewPost, Post, User};
use blog_core::error::RepoError;
use blog_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::sql_base::{SqlBaseRepository, map_db_err};

/// SQL user repository.
pub type SqlUserRepository = SqlBaseRepository<UserEntity>;

/// SQL post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, username: &str, date_joined: DateTime<Utc>) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            id: NotSet,
            username: Set(username.to_owned()),
            date_joined: Set(date_joined),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match map_db_err(e) {
            RepoError::Constraint(_) => {
                RepoError::Constraint(format!("username '{username}' is already taken"))
            }
            other => other,
        })?;

        Ok(model.into())
    }

    async fn delete_with_posts(&self, id: i64) -> Result<u64, RepoError> {
        tracing::debug!(user_id = id, "Deleting user and their posts");

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let posts = PostEntity::delete_many()
            .filter(post::Column::AuthorId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let users = UserEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if users.rows_affected == 0 {
            // Dropping the transaction rolls the post deletion back.
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(posts.rows_affected)
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let author_id = post.author_id;
        let active: post::ActiveModel = post.into();

        let model = active.insert(&self.db).await.map_err(|e| match map_db_err(e) {
            RepoError::Constraint(_) => {
                RepoError::Constraint(format!("author {author_id} does not exist"))
            }
            other => other,
        })?;

        Ok(model.into())
    }

    async fn publish(&self, id: i64, now: DateTime<Utc>) -> Result<Post, RepoError> {
        // Single conditional UPDATE: the date only moves when the row is not
        // yet published at `now`.
        let result = PostEntity::update_many()
            .col_expr(post::Column::PublishedDate, Expr::value(now))
            .filter(post::Column::Id.eq(id))
            .filter(
                Condition::any()
                    .add(post::Column::PublishedDate.is_null())
                    .add(post::Column::PublishedDate.gt(now)),
            )
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        if result.rows_affected == 0 {
            tracing::debug!(post_id = id, "Post already published, keeping its date");
        }

        Ok(model.into())
    }

    async fn find_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::PublishedDate.lte(now))
            .order_by_desc(post::Column::PublishedDate)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
