use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of posts. Accounts are owned by the authentication collaborator;
/// the blog only needs the identity and a name to attribute posts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Name shown next to a post.
    pub fn display_name(&self) -> &str {
        &self.username
    }
}
