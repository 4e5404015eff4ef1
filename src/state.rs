use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::models::popular::{default_board, PopularEntry};

/// Shared application state handed to every handler.
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    /// In-memory popular-tickets board; reset on restart.
    pub popular: RwLock<Vec<PopularEntry>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self {
            pool,
            config,
            popular: RwLock::new(default_board()),
        }
    }
}
