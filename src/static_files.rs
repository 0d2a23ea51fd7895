use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Response, StatusCode},
};
use mime_guess::MimeGuess;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::AppState;

pub const INDEX_PAGE: &str = "index.html";
pub const ADMIN_PAGE: &str = "admin.html";

fn cache_control_for(page: &str) -> HeaderValue {
    if page.ends_with(".html") {
        HeaderValue::from_static("no-store")
    } else {
        HeaderValue::from_static("public, max-age=3600")
    }
}

fn build_response(page: &str, bytes: Vec<u8>) -> Result<Response<Body>> {
    let mime = MimeGuess::from_path(page).first_or_octet_stream();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control_for(page))
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}

/// Read a fixed page from the public directory
pub async fn serve_page(public_dir: &Path, page: &str) -> Result<Response<Body>> {
    let bytes = tokio::fs::read(public_dir.join(page))
        .await
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                AppError::PageNotFound(page.to_string())
            } else {
                AppError::Io(e)
            }
        })?;

    build_response(page, bytes)
}

/// Recording page
/// GET /
pub async fn index_page(State(state): State<AppState>) -> Result<Response<Body>> {
    serve_page(&state.config.assets.public_dir, INDEX_PAGE).await
}

/// Administration page
/// GET /admin
pub async fn admin_page(State(state): State<AppState>) -> Result<Response<Body>> {
    serve_page(&state.config.assets.public_dir, ADMIN_PAGE).await
}
