use std::sync::Arc;

use crate::config::ServerConfig;

/// State handed to every handler through `State<AppState>`.
///
/// Cloned per request; both fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// sqlx connection pool.
    pub pool: taskhive_db::DbPool,
    /// Immutable server configuration.
    pub config: Arc<ServerConfig>,
}
