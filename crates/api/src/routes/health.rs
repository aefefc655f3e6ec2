use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of the liveness probe.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database probe fails.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Result of the `SELECT 1` connectivity probe.
    pub db_healthy: bool,
}

/// GET /health -- unauthenticated liveness probe.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = taskhive_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mounted at the root, outside the authenticated `/api/v1` tree.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
