//! The Content Store - the data access contract behind the read views.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{NewPost, Post, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, UserRepository};

/// Posts and their authors, as seen by the views and the authoring path.
#[derive(Clone)]
pub struct ContentStore {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl ContentStore {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Register an author for the authoring path to attribute posts to.
    pub async fn register_author(&self, username: &str) -> Result<User, DomainError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation(
                "username must not be empty".to_string(),
            ));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Validation(format!(
                "username '{username}' is already taken"
            )));
        }

        // A concurrent registration still trips the unique constraint.
        let user = self.users.insert(username, Utc::now()).await?;
        tracing::info!(user_id = user.id, username = %user.username, "Author registered");
        Ok(user)
    }

    /// Insert a new draft post.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<Post, DomainError> {
        let draft = NewPost::draft(title, content, author_id, Utc::now())?;

        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "author {author_id} does not exist"
            )));
        }

        // The author may vanish between the check and the insert; the
        // repository reports that as a constraint violation.
        let post = self.posts.insert(draft).await?;
        tracing::info!(post_id = post.id, author_id, "Draft created");
        Ok(post)
    }

    /// Publish a post now.
    pub async fn publish(&self, post_id: i64) -> Result<Post, DomainError> {
        self.publish_at(post_id, Utc::now()).await
    }

    /// Publish a post as of `now`. An already-published post keeps its date.
    pub async fn publish_at(&self, post_id: i64, now: DateTime<Utc>) -> Result<Post, DomainError> {
        let post = self
            .posts
            .publish(post_id, now)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::post_not_found(post_id),
                other => other.into(),
            })?;

        tracing::info!(post_id, published_date = ?post.published_date, "Post published");
        Ok(post)
    }

    /// Remove one post, whatever its state.
    pub async fn delete_post(&self, post_id: i64) -> Result<(), DomainError> {
        self.posts.delete(post_id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(post_id),
            other => other.into(),
        })?;

        tracing::info!(post_id, "Post deleted");
        Ok(())
    }

    /// Published posts as of `now`, newest first.
    ///
    /// Every call queries the store again; the returned vec is a snapshot.
    pub async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_published(now).await?)
    }

    /// Fetch one post by id, drafts included.
    pub async fn get(&self, post_id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))
    }

    /// The author a post is attributed to.
    pub async fn author_of(&self, post: &Post) -> Result<User, DomainError> {
        self.users
            .find_by_id(post.author_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(post.author_id))
    }

    /// Delete a user and all their posts atomically.
    pub async fn delete_author_cascade(&self, user_id: i64) -> Result<(), DomainError> {
        let removed = self
            .users
            .delete_with_posts(user_id)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::user_not_found(user_id),
                other => other.into(),
            })?;

        tracing::info!(user_id, posts_removed = removed, "Author deleted with their posts");
        Ok(())
    }
}
