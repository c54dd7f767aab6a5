//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ContentStore;
use blog_infra::database::{self, InMemoryContentRepository};
use blog_infra::{SqlPostRepository, SqlUserRepository};
use migration::{Migrator, MigratorTrait};

use crate::config::AppConfig;
use crate::render::TemplateRenderer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub renderer: Arc<TemplateRenderer>,
}

impl AppState {
    /// Build the application state with the configured storage.
    pub async fn new(config: &AppConfig, renderer: Arc<TemplateRenderer>) -> anyhow::Result<Self> {
        let store = match &config.database {
            Some(db_config) => {
                let conn = database::connect(db_config).await?;

                if config.auto_migrate {
                    Migrator::up(&conn, None).await?;
                    tracing::info!("Database migrations applied");
                }

                ContentStore::new(
                    Arc::new(SqlPostRepository::new(conn.clone())),
                    Arc::new(SqlUserRepository::new(conn)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL is empty. Running on the in-memory store.");
                in_memory_store()
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self::from_parts(store, renderer))
    }

    pub fn from_parts(store: ContentStore, renderer: Arc<TemplateRenderer>) -> Self {
        Self { store, renderer }
    }
}

/// A content store whose posts and users share one in-memory repository.
pub fn in_memory_store() -> ContentStore {
    let repo = Arc::new(InMemoryContentRepository::new());
    ContentStore::new(repo.clone(), repo)
}
