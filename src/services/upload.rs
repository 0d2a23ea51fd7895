use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use futures::{Stream, StreamExt, TryStreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{AppError, Result};
use crate::models::{UploadedVideo, VideoKind};
use crate::storage::VideoStore;

/// Multipart field carrying the recording
pub const VIDEO_FIELD: &str = "video";

/// Allowance for multipart boundaries and part headers on top of the file cap
pub const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

/// Upload service
pub struct UploadService;

impl UploadService {
    /// Store the `video` field of a multipart body.
    ///
    /// The file is streamed to disk; the upload aborts once more than `limit`
    /// bytes have arrived. On any failure the partial file is removed.
    pub async fn store_video(
        store: &VideoStore,
        mut multipart: Multipart,
        limit: u64,
    ) -> Result<UploadedVideo> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, limit))?
        {
            if field.name() == Some(VIDEO_FIELD) {
                return Self::write_field(store, field, limit).await;
            }
            tracing::debug!("Skipping multipart field {:?}", field.name());
        }

        Err(AppError::MissingFile)
    }

    async fn write_field(store: &VideoStore, field: Field<'_>, limit: u64) -> Result<UploadedVideo> {
        let (filename, mut file) = store.create(VideoKind::Webm).await?;

        let chunks = field.map_err(|e| multipart_error(e, limit));
        match copy_limited(chunks, &mut file, limit).await {
            Ok(size) => {
                tracing::info!(filename = %filename, size_bytes = size, "Video saved");
                Ok(UploadedVideo { filename, size })
            }
            Err(e) => {
                drop(file);
                store.remove_partial(&filename).await;
                Err(e)
            }
        }
    }
}

/// Copy chunks into `writer`, failing with `PayloadTooLarge` once the running
/// total passes `limit`. Returns the number of bytes written.
pub async fn copy_limited<S, W>(chunks: S, writer: &mut W, limit: u64) -> Result<u64>
where
    S: Stream<Item = Result<Bytes>>,
    W: AsyncWrite + Unpin,
{
    futures::pin_mut!(chunks);

    let mut written: u64 = 0;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        written += chunk.len() as u64;
        if written > limit {
            return Err(AppError::PayloadTooLarge { limit });
        }
        writer.write_all(&chunk).await?;
    }
    writer.flush().await?;

    Ok(written)
}

fn multipart_error(e: MultipartError, limit: u64) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::BadRequest(format!("Failed to process multipart: {}", e.body_text()))
    }
}
