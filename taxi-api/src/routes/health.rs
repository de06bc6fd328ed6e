/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```
///
/// Always answers 200; a failed database check reports `"degraded"`.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taxi_shared::db::pool;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match pool::health_check(&state.db).await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            ("degraded", "disconnected")
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: taxi_shared::VERSION.to_string(),
        database: database.to_string(),
    })
}
