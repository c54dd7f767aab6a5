//! In-memory content repository - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    last_user_id: i64,
    last_post_id: i64,
}

impl Tables {
    fn remove_user_with_posts(&mut self, id: i64) -> Result<u64, RepoError> {
        if self.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        let before = self.posts.len();
        self.posts.retain(|_, post| post.author_id != id);
        Ok((before - self.posts.len()) as u64)
    }
}

/// Users and posts kept in one map pair behind a single async RwLock.
///
/// Every write runs under one write guard, so each operation is atomic
/// with respect to the others. Data is lost on process restart.
pub struct InMemoryContentRepository {
    tables: RwLock<Tables>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryContentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryContentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    /// Mirrors the `ON DELETE CASCADE` of the SQL schema.
    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.tables.write().await.remove_user_with_posts(id)?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryContentRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert(&self, username: &str, date_joined: DateTime<Utc>) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == username) {
            return Err(RepoError::Constraint(format!(
                "username '{username}' is already taken"
            )));
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            username: username.to_owned(),
            date_joined,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_with_posts(&self, id: i64) -> Result<u64, RepoError> {
        self.tables.write().await.remove_user_with_posts(id)
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryContentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        match self.tables.write().await.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryContentRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }

        tables.last_post_id += 1;
        let post = Post {
            id: tables.last_post_id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            created_date: post.created_date,
            published_date: None,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn publish(&self, id: i64, now: DateTime<Utc>) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.publish(now);
        Ok(post.clone())
    }

    async fn find_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut published: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| p.is_published_at(now))
            .cloned()
            .collect();
        published.sort_by(|a, b| {
            b.published_date
                .cmp(&a.published_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(published)
    }
}
