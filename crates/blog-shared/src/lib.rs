//! # Blog Shared
//!
//! Types handed from the server to the page templates: the per-page view
//! models and the problem description used for error pages.

pub mod dto;
pub mod response;

pub use dto::{PostDetail, PostSummary};
pub use response::ErrorResponse;
