use axum::http::Uri;

use crate::error::AppError;

/// Any request no route matched, including a known path with an
/// unsupported method
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}
