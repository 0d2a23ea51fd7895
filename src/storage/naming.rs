use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::VideoKind;

const NAME_PREFIX: &str = "video_";
const SUFFIX_LEN: usize = 9;

/// Build a fresh `video_<millis>_<suffix>.<ext>` name.
///
/// Uniqueness is probabilistic: the millisecond clock plus nine characters
/// drawn from `[a-z0-9]`.
pub fn generate_name(kind: VideoKind) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();

    format!(
        "{}{}_{}.{}",
        NAME_PREFIX,
        Utc::now().timestamp_millis(),
        suffix,
        kind.extension()
    )
}

/// Accept a requested name only if it is a single plain path component
/// with a video extension.
pub fn validate_filename(name: &str) -> Result<VideoKind> {
    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
        // drive-relative names such as `C:clip.webm`
        || (cfg!(windows) && name.contains(':'))
        || Path::new(name).is_absolute();

    if unsafe_name {
        return Err(AppError::InvalidFilename(name.to_string()));
    }

    VideoKind::from_filename(name).ok_or_else(|| AppError::NotFound(name.to_string()))
}
