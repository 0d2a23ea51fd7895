use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::Response,
    Json,
};

use crate::error::Result;
use crate::models::{VideoInfoResponse, VideoListResponse};
use crate::services::StreamService;
use crate::AppState;

/// List stored videos
/// GET /videos-list, GET /videos
pub async fn list_videos(State(state): State<AppState>) -> Result<Json<VideoListResponse>> {
    let videos = state.store.list().await?;
    Ok(Json(VideoListResponse { videos }))
}

/// Get metadata for one video
/// GET /video-info/:filename
pub async fn video_info(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<VideoInfoResponse>> {
    let meta = state.store.stat(&filename).await?;
    Ok(Json(meta.into()))
}

/// Stream a video for inline playback
/// GET /videos/:filename
pub async fn stream_video(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    let video = state.store.open(&filename).await?;
    let range = headers.get(header::RANGE).and_then(|v| v.to_str().ok());
    StreamService::inline(video, range).await
}

/// Download a video as an attachment
/// GET /download/:filename
pub async fn download_video(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let video = state.store.open(&filename).await?;
    tracing::debug!(filename = %filename, size_bytes = video.metadata.size, "Download started");
    StreamService::attachment(video, &filename)
}
