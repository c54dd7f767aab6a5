use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewPost, Post, User};
use crate::error::RepoError;

/// Generic repository trait shared by every entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Store a new user; a taken username is a `Constraint` error.
    async fn insert(&self, username: &str, date_joined: DateTime<Utc>) -> Result<User, RepoError>;

    /// Delete the user together with every post they wrote, as one unit.
    ///
    /// Returns the number of posts removed; `NotFound` leaves everything intact.
    async fn delete_with_posts(&self, id: i64) -> Result<u64, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Store a draft; a missing author is a `Constraint` error.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply [`Post::publish`] to the stored post in a single atomic step.
    async fn publish(&self, id: i64, now: DateTime<Utc>) -> Result<Post, RepoError>;

    /// Posts with `published_date <= now`, newest first.
    async fn find_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError>;
}
