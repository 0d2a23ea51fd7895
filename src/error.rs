use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Video not found: {0}")]
    NotFound(String),

    #[error("Invalid video filename: {0}")]
    InvalidFilename(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("No video uploaded")]
    MissingFile,

    #[error("File too large: limit is {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Failed to read videos directory: {0}")]
    DirectoryRead(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: &str, details: Option<String>) -> Self {
        Self {
            error: error.to_string(),
            details,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_)
            | AppError::InvalidFilename(_)
            | AppError::PageNotFound(_)
            | AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MissingFile | AppError::PayloadTooLarge { .. } | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::DirectoryRead(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::NotFound(name) => {
                tracing::debug!("Video not found: {}", name);
                ErrorBody::new("Video not found", None)
            }
            AppError::InvalidFilename(name) => {
                tracing::warn!("Rejected video filename: {:?}", name);
                ErrorBody::new("Video not found", Some("Invalid filename".to_string()))
            }
            AppError::PageNotFound(page) => {
                tracing::warn!("Page file missing: {}", page);
                return (
                    status,
                    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    not_found_page(page),
                )
                    .into_response();
            }
            AppError::RouteNotFound(path) => {
                tracing::debug!("No route for {}", path);
                let body = serde_json::json!({ "error": "Route not found", "path": path });
                return (status, Json(body)).into_response();
            }
            AppError::MissingFile => ErrorBody::new("No video uploaded", None),
            AppError::PayloadTooLarge { limit } => {
                tracing::warn!("Upload rejected, exceeds {} bytes", limit);
                ErrorBody::new(
                    "File too large",
                    Some(format!("Maximum upload size is {} bytes", limit)),
                )
            }
            AppError::BadRequest(msg) => ErrorBody::new("Bad request", Some(msg.clone())),
            AppError::DirectoryRead(e) => {
                tracing::error!("Directory read error: {:?}", e);
                ErrorBody::new("Failed to read videos directory", Some(e.to_string()))
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                ErrorBody::new("IO error", Some(e.to_string()))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorBody::new("Server error", Some(msg.clone()))
            }
        };

        (status, Json(body)).into_response()
    }
}

fn not_found_page(page: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>404 Not Found</title></head>\
         <body><h1>404 Not Found</h1><p>Page <code>{}</code> is not available.</p></body></html>",
        page
    )
}

pub type Result<T> = std::result::Result<T, AppError>;
