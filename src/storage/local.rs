use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};

use crate::config::StorageConfig;
use crate::error::{AppError, Result};
use crate::models::{VideoKind, VideoMetadata};
use crate::storage::{generate_name, validate_filename};

/// Flat local directory of video files
pub struct VideoStore {
    base_path: PathBuf,
}

/// A stored video opened for reading
pub struct OpenedVideo {
    pub file: File,
    pub kind: VideoKind,
    pub metadata: VideoMetadata,
}

impl VideoStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            base_path: config.videos_dir.clone(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, filename: &str) -> Result<(PathBuf, VideoKind)> {
        let kind = validate_filename(filename)?;
        Ok((self.base_path.join(filename), kind))
    }

    /// Create the storage directory and its parents if absent
    pub async fn ensure_directory(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Names of stored videos, in directory order
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(AppError::DirectoryRead)?;

        let mut videos = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(AppError::DirectoryRead)? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            // only names the retrieval routes would also accept
            if validate_filename(&name).is_err() {
                continue;
            }
            match entry.file_type().await {
                Ok(file_type) if file_type.is_file() => videos.push(name),
                _ => {}
            }
        }

        Ok(videos)
    }

    pub async fn stat(&self, filename: &str) -> Result<VideoMetadata> {
        let (path, _) = self.resolve(filename)?;
        let meta = fs::metadata(&path)
            .await
            .map_err(|e| not_found_or_io(e, filename))?;

        if !meta.is_file() {
            return Err(AppError::NotFound(filename.to_string()));
        }
        Ok(VideoMetadata::from_fs(&meta))
    }

    /// Open a stored video; metadata comes from the open handle.
    pub async fn open(&self, filename: &str) -> Result<OpenedVideo> {
        let (path, kind) = self.resolve(filename)?;
        let file = File::open(&path)
            .await
            .map_err(|e| not_found_or_io(e, filename))?;
        let meta = file.metadata().await?;

        if !meta.is_file() {
            return Err(AppError::NotFound(filename.to_string()));
        }

        Ok(OpenedVideo {
            file,
            kind,
            metadata: VideoMetadata::from_fs(&meta),
        })
    }

    /// Create a new, empty video under a freshly generated name.
    /// Fails rather than overwriting should the name already exist.
    pub async fn create(&self, kind: VideoKind) -> Result<(String, File)> {
        let filename = generate_name(kind);
        let path = self.base_path.join(&filename);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        tracing::debug!("Created {:?}", path);
        Ok((filename, file))
    }

    /// Best-effort removal of a video whose upload did not complete
    pub async fn remove_partial(&self, filename: &str) {
        let path = self.base_path.join(filename);
        match fs::remove_file(&path).await {
            Ok(()) => tracing::info!("Removed partial upload {:?}", path),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove partial upload {:?}: {}", path, e),
        }
    }
}

fn not_found_or_io(e: std::io::Error, filename: &str) -> AppError {
    if e.kind() == ErrorKind::NotFound {
        AppError::NotFound(filename.to_string())
    } else {
        AppError::Io(e)
    }
}
