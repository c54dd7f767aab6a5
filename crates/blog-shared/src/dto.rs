//! View models - what each page template receives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the `/posts/` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    /// Full content; the template cuts the preview.
    pub content: String,
    pub published_date: Option<DateTime<Utc>>,
}

/// Everything `/post/{id}/` shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub title: String,
    pub content: String,
    pub author: String,
    pub published_date: Option<DateTime<Utc>>,
}
