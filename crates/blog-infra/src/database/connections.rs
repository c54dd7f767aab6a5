#[cfg(feature = "database")]
use std::time::Duration;

#[cfg(feature = "database")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the blog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `sqlite://...` or `postgres://...`.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    #[cfg(feature = "database")]
    fn is_in_memory(&self) -> bool {
        self.is_sqlite() && self.url.contains(":memory:")
    }
}

/// Open the connection pool described by `config`.
///
/// An in-memory SQLite database lives only as long as its connection, so the
/// pool is pinned to a single connection.
#[cfg(feature = "database")]
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let mut opts = ConnectOptions::new(config.url.as_str());
    opts.connect_timeout(Duration::from_secs(10)).sqlx_logging(true);

    if config.is_in_memory() {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(300));
    }

    let conn = Database::connect(opts).await?;
    tracing::info!(
        sqlite = config.is_sqlite(),
        "Database connected (pool: {})",
        if config.is_in_memory() { 1 } else { config.max_connections }
    );

    Ok(conn)
}
