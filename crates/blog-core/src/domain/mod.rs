//! Domain entities - the core business objects.

mod post;
mod text;
mod user;

pub use post::{NewPost, Post, TITLE_MAX_CHARS};
pub use text::{PREVIEW_WORDS, TRUNCATION_MARKER, truncate_words};
pub use user::User;
