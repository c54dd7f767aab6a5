use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Longest title the `posts.title` column accepts.
pub const TITLE_MAX_CHARS: usize = 200;

/// Post entity - one blog entry, either a draft or published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub created_date: DateTime<Utc>,
    /// `None` while the post is a draft.
    pub published_date: Option<DateTime<Utc>>,
}

impl Post {
    /// Whether the post is visible to the public read views at `now`.
    ///
    /// A `published_date` in the future counts as not yet published.
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.published_date.is_some_and(|published| published <= now)
    }

    /// Mark the post as published at `now`.
    ///
    /// Already-published posts keep their original date. Returns `true` when
    /// `published_date` changed and the post needs to be written back.
    pub fn publish(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_published_at(now) {
            return false;
        }
        self.published_date = Some(now);
        true
    }
}

/// A post that has not been stored yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub created_date: DateTime<Utc>,
}

impl NewPost {
    /// Build a draft, rejecting blank fields and over-long titles.
    pub fn draft(
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: i64,
        created_date: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let content = content.into();

        if title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "title must be at most {TITLE_MAX_CHARS} characters"
            )));
        }
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "content must not be empty".to_string(),
            ));
        }

        Ok(Self {
            title,
            content,
            author_id,
            created_date,
        })
    }
}
