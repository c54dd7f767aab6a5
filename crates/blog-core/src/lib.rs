//! # Blog Core
//!
//! The domain layer of the blog: the Post publishing model, the repository
//! ports it persists through, and the [`ContentStore`] that the read views
//! query. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::ContentStore;
