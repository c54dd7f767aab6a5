//! Storage for posts and their authors.

mod connections;
mod memory;

#[cfg(feature = "database")]
mod sql_base;
#[cfg(feature = "database")]
mod sql_repo;

#[cfg(feature = "database")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::InMemoryContentRepository;

#[cfg(feature = "database")]
pub use connections::connect;
#[cfg(feature = "database")]
pub use sql_repo::{SqlPostRepository, SqlUserRepository};

#[cfg(feature = "database")]
#[cfg(test)]
mod tests;
