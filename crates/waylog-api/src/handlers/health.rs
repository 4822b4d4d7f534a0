//! Health check handlers.

use axum::Json;
use axum::extract::State;
use serde_json::json;

use crate::state::AppState;

/// GET /api/health
///
/// Liveness plus a database round trip; unauthenticated.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
    {
        Ok(_) => "up",
        Err(err) => {
            tracing::warn!(error = %err, "Health check database probe failed");
            "down"
        }
    };

    Json(json!({
        "status": if database == "up" { "ok" } else { "degraded" },
        "database": database,
    }))
}
