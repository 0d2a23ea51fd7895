use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fs::Metadata;
use std::time::SystemTime;

/// Container formats the store accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoKind {
    Webm,
    Mp4,
}

impl VideoKind {
    pub const ALL: [VideoKind; 2] = [VideoKind::Webm, VideoKind::Mp4];

    pub fn extension(&self) -> &'static str {
        match self {
            VideoKind::Webm => "webm",
            VideoKind::Mp4 => "mp4",
        }
    }

    /// Kind of a stored file, judged by its extension alone
    pub fn from_filename(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| name.strip_suffix(kind.extension()).is_some_and(|rest| rest.ends_with('.')))
    }

    pub fn content_type(&self) -> &'static str {
        mime_guess::from_ext(self.extension())
            .first_raw()
            .unwrap_or("application/octet-stream")
    }
}

/// Filesystem-sourced facts about a stored video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

impl VideoMetadata {
    /// Platforms without birth time report the modification time as creation time.
    pub fn from_fs(meta: &Metadata) -> Self {
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = meta.created().unwrap_or(modified);
        Self {
            size: meta.len(),
            modified: DateTime::<Utc>::from(modified),
            created: DateTime::<Utc>::from(created),
        }
    }
}

/// Result of a stored upload
#[derive(Debug, Clone)]
pub struct UploadedVideo {
    pub filename: String,
    pub size: u64,
}

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub path: String,
    pub size: u64,
}

impl From<UploadedVideo> for UploadResponse {
    fn from(video: UploadedVideo) -> Self {
        Self {
            success: true,
            path: format!("/videos/{}", video.filename),
            filename: video.filename,
            size: video.size,
        }
    }
}

/// Video list response
#[derive(Debug, Serialize)]
pub struct VideoListResponse {
    pub videos: Vec<String>,
}

/// Per-video metadata response
#[derive(Debug, Serialize)]
pub struct VideoInfoResponse {
    pub size: u64,
    /// Human readable modification date
    pub date: String,
    pub created: String,
}

impl From<VideoMetadata> for VideoInfoResponse {
    fn from(meta: VideoMetadata) -> Self {
        Self {
            size: meta.size,
            date: meta.modified.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            created: meta.created.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn kind_is_taken_from_extension() {
        assert_eq!(VideoKind::from_filename("video_1_abc.webm"), Some(VideoKind::Webm));
        assert_eq!(VideoKind::from_filename("clip.mp4"), Some(VideoKind::Mp4));
        assert_eq!(VideoKind::from_filename("notes.txt"), None);
        assert_eq!(VideoKind::from_filename("webm"), None);
        assert_eq!(VideoKind::from_filename("clipmp4"), None);
    }

    #[test]
    fn content_types() {
        assert_eq!(VideoKind::Webm.content_type(), "video/webm");
        assert_eq!(VideoKind::Mp4.content_type(), "video/mp4");
    }

    #[test]
    fn upload_response_points_at_stream_route() {
        let response = UploadResponse::from(UploadedVideo {
            filename: "video_1_abcdefghi.webm".to_string(),
            size: 1024,
        });
        assert!(response.success);
        assert_eq!(response.path, "/videos/video_1_abcdefghi.webm");
        assert_eq!(response.size, 1024);
    }

    #[test]
    fn info_formats_dates() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let info = VideoInfoResponse::from(VideoMetadata {
            size: 42,
            modified: at,
            created: at,
        });
        assert_eq!(info.date, "2024-03-09 14:05:07 UTC");
        assert_eq!(info.created, "2024-03-09T14:05:07.000Z");
    }
}
