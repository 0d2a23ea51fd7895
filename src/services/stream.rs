use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use futures::TryStreamExt;
use std::io::SeekFrom;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::error::{AppError, Result};
use crate::storage::OpenedVideo;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Inclusive byte range within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn content_range(&self, total: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, total)
    }
}

/// How a `Range` header applies to a file of a given size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRequest {
    Full,
    Partial(ByteRange),
    Unsatisfiable,
}

/// Interpret a `Range` header against a file of `total` bytes.
///
/// Only a single `bytes=` range is honoured. Malformed or multi-range
/// headers fall back to the full body.
pub fn parse_range(header: Option<&str>, total: u64) -> RangeRequest {
    let Some(ranges) = header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeRequest::Full;
    };
    if ranges.contains(',') {
        return RangeRequest::Full;
    }
    let Some((start, end)) = ranges.trim().split_once('-') else {
        return RangeRequest::Full;
    };
    let (start, end) = (start.trim(), end.trim());

    if start.is_empty() {
        // suffix form: last n bytes
        let Ok(n) = end.parse::<u64>() else {
            return RangeRequest::Full;
        };
        if n == 0 || total == 0 {
            return RangeRequest::Unsatisfiable;
        }
        return RangeRequest::Partial(ByteRange {
            start: total.saturating_sub(n),
            end: total - 1,
        });
    }

    let Ok(start) = start.parse::<u64>() else {
        return RangeRequest::Full;
    };
    let end = if end.is_empty() {
        None
    } else {
        match end.parse::<u64>() {
            Ok(end) if end >= start => Some(end),
            _ => return RangeRequest::Full,
        }
    };

    if start >= total {
        return RangeRequest::Unsatisfiable;
    }

    let last = total - 1;
    RangeRequest::Partial(ByteRange {
        start,
        end: end.map_or(last, |end| end.min(last)),
    })
}

/// Stream builder for stored videos
pub struct StreamService;

impl StreamService {
    /// Inline playback response, honouring a single byte range
    pub async fn inline(video: OpenedVideo, range_header: Option<&str>) -> Result<Response> {
        let OpenedVideo {
            mut file,
            kind,
            metadata,
        } = video;
        let total = metadata.size;

        let builder = Response::builder()
            .header(header::CONTENT_TYPE, kind.content_type())
            .header(header::ACCEPT_RANGES, "bytes")
            .header(header::CACHE_CONTROL, NO_CACHE);

        let response = match parse_range(range_header, total) {
            RangeRequest::Full => builder
                .status(StatusCode::OK)
                .header(header::CONTENT_LENGTH, total)
                .body(file_body(file, total)),
            RangeRequest::Partial(range) => {
                file.seek(SeekFrom::Start(range.start)).await?;
                builder
                    .status(StatusCode::PARTIAL_CONTENT)
                    .header(header::CONTENT_RANGE, range.content_range(total))
                    .header(header::CONTENT_LENGTH, range.len())
                    .body(file_body(file, range.len()))
            }
            RangeRequest::Unsatisfiable => builder
                .status(StatusCode::RANGE_NOT_SATISFIABLE)
                .header(header::CONTENT_RANGE, format!("bytes */{}", total))
                .body(Body::empty()),
        };

        response.map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
    }

    /// Forced download response
    pub fn attachment(video: OpenedVideo, filename: &str) -> Result<Response> {
        let total = video.metadata.size;

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, video.kind.content_type())
            .header(header::CONTENT_LENGTH, total)
            .header(header::CONTENT_DISPOSITION, content_disposition(filename))
            .body(file_body(video.file, total))
            .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
    }
}

/// `attachment` disposition with the name as an escaped quoted-string
fn content_disposition(filename: &str) -> String {
    let mut quoted = String::with_capacity(filename.len() + 2);
    for c in filename.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() => quoted.push('_'),
            c => quoted.push(c),
        }
    }
    format!("attachment; filename=\"{}\"", quoted)
}

/// Body streaming at most `len` bytes from the file's current position.
/// A read error ends the stream, which aborts the connection.
fn file_body(file: File, len: u64) -> Body {
    let stream = ReaderStream::new(file.take(len)).inspect_err(|e| {
        tracing::error!("Video stream read failed: {}", e);
    });
    Body::from_stream(stream)
}
