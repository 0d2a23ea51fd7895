use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok(videos: usize) -> Self {
        Self {
            status: "ok",
            videos: Some(videos),
            error: None,
            timestamp: now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: "error",
            videos: None,
            error: Some(message),
            timestamp: now(),
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
