use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Liveness plus a database round-trip. Responds 503 while the database is
/// unreachable so load balancers can take the instance out of rotation.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = discuss_db::health_check(&state.pool).await.is_ok();

    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        tracing::warn!("Health check failed to reach the database");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
