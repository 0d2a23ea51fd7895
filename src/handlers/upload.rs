use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::error::{AppError, Result};
use crate::models::UploadResponse;
use crate::services::UploadService;
use crate::AppState;

/// Upload a recording
/// POST /upload (multipart field `video`)
pub async fn upload_video(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    // A body that is not multipart at all carries no `video` field either
    let multipart = multipart.map_err(|e| {
        tracing::debug!("Upload without multipart body: {}", e);
        AppError::MissingFile
    })?;

    let video = UploadService::store_video(
        &state.store,
        multipart,
        state.config.storage.max_upload_bytes,
    )
    .await?;

    Ok(Json(video.into()))
}
