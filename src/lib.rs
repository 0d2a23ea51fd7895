pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod static_files;
pub mod storage;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::upload::MULTIPART_OVERHEAD;
use crate::storage::VideoStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<VideoStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = VideoStore::new(&config.storage);
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_body_limit: usize = state
        .config
        .storage
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD)
        .try_into()
        .unwrap_or(usize::MAX);

    Router::new()
        // Pages
        .route("/", get(static_files::index_page))
        .route("/admin", get(static_files::admin_page))
        // Upload
        .route(
            "/upload",
            post(handlers::upload::upload_video).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        // Retrieval
        .route("/videos-list", get(handlers::video::list_videos))
        .route("/videos", get(handlers::video::list_videos))
        .route("/videos/:filename", get(handlers::video::stream_video))
        .route("/video-info/:filename", get(handlers::video::video_info))
        .route("/download/:filename", get(handlers::video::download_video))
        .route("/health", get(handlers::health::health))
        // must follow the routes it applies to
        .method_not_allowed_fallback(handlers::fallback::route_not_found)
        .fallback(handlers::fallback::route_not_found)
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
