use liftlog::auth::IdentityProvider;
use liftlog::cache::DashboardCache;
use liftlog::db::models::UserId;
use liftlog::session::Session;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared state handed to every handler through `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<ServerConfig>,
    pub identity: Arc<dyn IdentityProvider>,
    /// One cache for the whole process, so a mutation by any request clears it.
    pub dashboard: Arc<DashboardCache>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        config: ServerConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            identity,
            dashboard: Arc::new(DashboardCache::new()),
        }
    }

    pub fn session(&self, caller: Option<UserId>) -> Session {
        Session::new(self.pool.clone(), caller, Arc::clone(&self.dashboard))
    }
}
