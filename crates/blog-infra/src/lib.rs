//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `database` - SQLite/PostgreSQL storage via SeaORM

pub mod database;

pub use database::{DatabaseConfig, InMemoryContentRepository};

#[cfg(feature = "database")]
pub use database::{SqlPostRepository, SqlUserRepository};
