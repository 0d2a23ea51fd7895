use axum::{extract::State, http::StatusCode, Json};

use crate::models::HealthResponse;
use crate::AppState;

/// Health check
/// GET /health
///
/// A store failure is reported in the body with a 500 status rather than
/// failing the request itself.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.list().await {
        Ok(videos) => (StatusCode::OK, Json(HealthResponse::ok(videos.len()))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse::error(e.to_string())),
            )
        }
    }
}
