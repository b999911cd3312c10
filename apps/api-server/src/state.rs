//! Application state - shared across all handlers.

use std::sync::Arc;

use weblog_core::{AuthService, PostService};
use weblog_infra::database::{self, SeaOrmPostRepository, SeaOrmUserRepository};
use weblog_infra::{Argon2PasswordService, InMemorySessionStore};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
}

impl AppState {
    /// Connect to the store, ensure the schema and wire the workflows.
    pub async fn new(config: &AppConfig) -> Result<Self, weblog_infra::database::DbErr> {
        let db = database::connect(&config.database).await?;
        database::create_tables(&db).await?;

        let auth = Arc::new(AuthService::new(
            Arc::new(SeaOrmUserRepository::new(db.clone())),
            Arc::new(Argon2PasswordService::new()),
            Arc::new(InMemorySessionStore::with_ttl(config.session_ttl)),
        ));
        let posts = Arc::new(PostService::new(
            auth.clone(),
            Arc::new(SeaOrmPostRepository::new(db)),
        ));

        tracing::info!("Application state initialized");

        Ok(Self { auth, posts })
    }
}
