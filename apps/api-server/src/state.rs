//! Application state - shared across all handlers.

use std::sync::Arc;

use quire_core::PostService;
use quire_core::ports::{PostRepository, UserRepository};
use quire_infra::database::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use quire_infra::database::{DatabaseConnections, PostgresPostRepository, PostgresUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: Arc<dyn UserRepository>,
    pub page_size: u64,
}

impl AppState {
    /// Build the application state with appropriate store implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>, page_size: u64) -> Self {
        let (posts, users) = Self::stores(db_config).await;
        tracing::info!("Application state initialized");

        Self::from_stores(posts, users, page_size)
    }

    /// State backed by fresh in-memory stores.
    pub fn in_memory(page_size: u64) -> Self {
        Self::from_stores(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            page_size,
        )
    }

    fn from_stores(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        page_size: u64,
    ) -> Self {
        Self {
            posts: PostService::new(posts, users.clone()),
            users,
            page_size,
        }
    }

    #[cfg(feature = "postgres")]
    async fn stores(
        db_config: Option<&DatabaseConfig>,
    ) -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return in_memory_stores();
        };

        match DatabaseConnections::init(config).await {
            Ok(connections) => (
                Arc::new(PostgresPostRepository::new(connections.main.clone())),
                Arc::new(PostgresUserRepository::new(connections.main)),
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                in_memory_stores()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn stores(
        _db_config: Option<&DatabaseConfig>,
    ) -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
        tracing::info!("Running without postgres feature - using in-memory stores");
        in_memory_stores()
    }
}

fn in_memory_stores() -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
    (
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
    )
}
